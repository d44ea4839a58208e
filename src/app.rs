// src/app.rs

use crate::catalog::Catalog;
use crate::config::Config;
use crate::constants::{APP_BOOT_MESSAGE, CHAT_PROMPT};
use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::renderer::{Renderer, TerminalRenderer};
use crate::retriever::CatalogRetriever;
use crate::session::Session;
use crate::turn::process_turn;
use crate::utils::build_error_message;
use log::{error, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Builds everything a session needs: the catalog, the retriever over it,
/// and a fresh session. Any failure here is fatal; no input is ever
/// accepted.
pub fn initialize(config: &Config) -> ShopclerkResult<(Session, CatalogRetriever)> {
    let catalog = Catalog::load(&config.catalog_path)
        .map_err(ShopclerkError::into_initialization)?;
    info!("catalog loaded: {} products", catalog.len());

    let retriever = CatalogRetriever::new(catalog, config.shortlist_size, config.clone());
    Ok((Session::new(), retriever))
}

/// The interactive loop. One submitted message drives one turn, end to
/// end, before the next message is read; per-turn failures surface a
/// generic message and the loop continues.
pub async fn run(config: &Config) -> ShopclerkResult<()> {
    let (mut session, retriever) = initialize(config)?;

    if !session.initialized {
        session.initialized = true;
        info!("{}", APP_BOOT_MESSAGE);
    }

    let mut renderer = TerminalRenderer::new();
    renderer.display_app_title()?;
    renderer.display_initial_message()?;

    // Shown once before input is accepted; fatal if it fails, like
    // initialization.
    renderer.display_conversation_log(session.messages())?;

    let mut editor = DefaultEditor::new()
        .map_err(|e| ShopclerkError::initialization(format!("Failed to open input: {}", e)))?;

    loop {
        match editor.readline(CHAT_PROMPT) {
            Ok(line) => {
                let input = line.trim();
                // Empty submissions never reach the turn handler.
                if input.is_empty() {
                    continue;
                }
                if input == "exit" || input == "quit" {
                    break;
                }
                let _ = editor.add_history_entry(input);

                if let Err(e) = process_turn(&mut session, &retriever, &mut renderer, input).await
                {
                    error!("{}", e);
                    renderer.display_error(&build_error_message(e.user_message()))?;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(ShopclerkError::render(format!("Input error: {}", e)));
            }
        }
    }

    info!("session ended with {} logged messages", session.messages().len());
    Ok(())
}
