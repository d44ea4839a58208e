// src/turn.rs
//
// The conversation turn handler: one user message in, one assistant
// response out, or nothing at all. The pipeline is linear and fail-fast;
// there is no retry, no timeout, and no partial log entry.

use crate::constants::SPINNER_TEXT;
use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::renderer::Renderer;
use crate::retriever::Retriever;
use crate::session::Session;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Duration;

/// Processes exactly one non-empty user message to completion. The caller
/// filters empty input and decides what to do with a failure; on any error
/// the session log is untouched.
pub async fn process_turn(
    session: &mut Session,
    retriever: &dyn Retriever,
    renderer: &mut dyn Renderer,
    input: &str,
) -> ShopclerkResult<()> {
    // 1. Show the user's message before any backend call starts.
    info!("user message: {}", input);
    renderer.display_user_message(input)?;

    // 2. Retrieve, with a spinner while the call blocks.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(SPINNER_TEXT);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = retriever.invoke(input, session.messages()).await;
    spinner.finish_and_clear();
    let recommendation = result.map_err(ShopclerkError::into_retrieval)?;

    // 3. Show the result. The user's message stays on screen even if this
    // fails, but the turn is never appended.
    renderer.display_recommendation(&recommendation)?;
    let assistant_content = recommendation.log_content();
    info!("assistant message: {}", assistant_content);

    // 4. Persist the turn only now that both steps succeeded.
    session.append_turn(input, &assistant_content);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Product, Recommendation};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubRetriever {
        outcome: Result<Recommendation, String>,
        seen_history: Mutex<Vec<Vec<String>>>,
    }

    impl StubRetriever {
        fn with_outcome(outcome: Result<Recommendation, String>) -> Self {
            StubRetriever {
                outcome,
                seen_history: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Retriever for StubRetriever {
        async fn invoke(&self, _query: &str, history: &[Message]) -> ShopclerkResult<Recommendation> {
            self.seen_history
                .lock()
                .unwrap()
                .push(history.iter().map(|m| m.content.clone()).collect());
            self.outcome.clone().map_err(|e| ShopclerkError::retrieval(e))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        shown: Vec<String>,
        fail_on_recommendation: bool,
    }

    impl Renderer for RecordingRenderer {
        fn display_app_title(&mut self) -> ShopclerkResult<()> {
            Ok(())
        }

        fn display_initial_message(&mut self) -> ShopclerkResult<()> {
            Ok(())
        }

        fn display_user_message(&mut self, content: &str) -> ShopclerkResult<()> {
            self.shown.push(format!("user:{}", content));
            Ok(())
        }

        fn display_recommendation(
            &mut self,
            recommendation: &Recommendation,
        ) -> ShopclerkResult<()> {
            if self.fail_on_recommendation {
                return Err(ShopclerkError::render("broken display"));
            }
            self.shown
                .push(format!("assistant:{}", recommendation.product.name));
            Ok(())
        }

        fn display_conversation_log(&mut self, messages: &[Message]) -> ShopclerkResult<()> {
            self.shown.push(format!("log:{}", messages.len()));
            Ok(())
        }

        fn display_error(&mut self, message: &str) -> ShopclerkResult<()> {
            self.shown.push(format!("error:{}", message));
            Ok(())
        }
    }

    fn laptop_recommendation() -> Recommendation {
        Recommendation {
            product: Product {
                id: "p-1".to_string(),
                name: "X1 Laptop".to_string(),
                category: "laptops".to_string(),
                maker: "Lemono".to_string(),
                price: 129800,
                description: "14-inch business laptop".to_string(),
                stock: 3,
            },
            reason: "light and sturdy".to_string(),
            alternatives: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_successful_turn_appends_user_then_assistant() {
        let mut session = Session::new();
        let retriever = StubRetriever::with_outcome(Ok(laptop_recommendation()));
        let mut renderer = RecordingRenderer::default();

        process_turn(&mut session, &retriever, &mut renderer, "recommend a laptop")
            .await
            .unwrap();

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].content, "recommend a laptop");
        assert!(session.messages()[1].content.contains("X1 Laptop"));
        assert_eq!(
            renderer.shown,
            vec!["user:recommend a laptop", "assistant:X1 Laptop"]
        );
    }

    #[tokio::test]
    async fn test_retrieval_failure_leaves_log_untouched() {
        let mut session = Session::new();
        session.append_turn("earlier", "answer");
        let retriever = StubRetriever::with_outcome(Err("backend down".to_string()));
        let mut renderer = RecordingRenderer::default();

        let err = process_turn(&mut session, &retriever, &mut renderer, "xyz")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopclerkError::Retrieval { .. }));
        assert_eq!(session.messages().len(), 2);
        // The user's message was already shown; no assistant entry follows.
        assert_eq!(renderer.shown, vec!["user:xyz"]);
    }

    #[tokio::test]
    async fn test_render_failure_leaves_log_untouched() {
        let mut session = Session::new();
        let retriever = StubRetriever::with_outcome(Ok(laptop_recommendation()));
        let mut renderer = RecordingRenderer {
            fail_on_recommendation: true,
            ..RecordingRenderer::default()
        };

        let err = process_turn(&mut session, &retriever, &mut renderer, "recommend a laptop")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopclerkError::Render { .. }));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_second_turn_extends_log_in_order() {
        let mut session = Session::new();
        let retriever = StubRetriever::with_outcome(Ok(laptop_recommendation()));
        let mut renderer = RecordingRenderer::default();

        process_turn(&mut session, &retriever, &mut renderer, "first question")
            .await
            .unwrap();
        process_turn(&mut session, &retriever, &mut renderer, "second question")
            .await
            .unwrap();

        assert_eq!(session.messages().len(), 4);
        assert_eq!(session.messages()[2].content, "second question");
    }

    #[tokio::test]
    async fn test_retriever_receives_prior_turns() {
        let mut session = Session::new();
        let retriever = StubRetriever::with_outcome(Ok(laptop_recommendation()));
        let mut renderer = RecordingRenderer::default();

        process_turn(&mut session, &retriever, &mut renderer, "recommend a laptop")
            .await
            .unwrap();
        process_turn(&mut session, &retriever, &mut renderer, "something cheaper than that")
            .await
            .unwrap();

        let seen = retriever.seen_history.lock().unwrap();
        // First turn starts from an empty log; the second sees both sides
        // of the first turn.
        assert!(seen[0].is_empty());
        assert_eq!(
            seen[1],
            vec![
                "recommend a laptop".to_string(),
                "X1 Laptop — light and sturdy".to_string(),
            ]
        );
    }
}
