// src/api.rs

use crate::config::Config;
use crate::constants::{ANTHROPIC_VERSION, MESSAGES_ENDPOINT};
use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::logging::log_api_call;
use crate::models::ApiCallLog;
use chrono::Utc;
use lru::LruCache;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Instant;

// Response cache
static API_CACHE: Lazy<Mutex<LruCache<String, ApiResponse>>> =
    Lazy::new(|| Mutex::new(LruCache::new(std::num::NonZeroUsize::new(100).unwrap())));

#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

/// Makes a request to the Claude API and returns the response.
/// Caches responses to reduce duplicate API calls.
pub async fn get_claude_response(
    config: &Config,
    user_input: &str,
    history: &[Value],
    system_prompt: &str,
) -> ShopclerkResult<ApiResponse> {
    // Check if response is in cache. The key covers everything that can
    // change the reply: model, system prompt, history, and input.
    let cache_key = format!(
        "{}:{}:{:?}:{}",
        config.model, system_prompt, history, user_input
    );
    if let Some(cached_response) = API_CACHE.lock().unwrap().get(&cache_key) {
        return Ok(cached_response.clone());
    }

    let mut messages = history.to_vec();
    messages.push(json!({ "role": "user", "content": user_input }));
    let messages_json = serde_json::to_string(&messages)
        .map_err(|e| ShopclerkError::api_error(format!("Failed to serialize messages: {}", e)))?;

    // Rough token approximation; good enough for a pre-flight check
    let token_count = messages_json.len() / 4;

    if token_count > config.token_limit_threshold as usize {
        return Err(ShopclerkError::token_error(format!(
            "Input exceeds token limit threshold: {} tokens (limit: {})",
            token_count, config.token_limit_threshold
        )));
    }

    // Prepare request payload
    let payload = json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "messages": messages,
        "system": system_prompt,
        "temperature": config.temperature
    });

    let endpoint = format!(
        "{}{}",
        config.api_base_url.trim_end_matches('/'),
        MESSAGES_ENDPOINT
    );

    // Make API request
    let client = Client::new();
    let start_time = Instant::now();
    let response = client
        .post(&endpoint)
        .header("x-api-key", &config.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&payload)
        .send()
        .await
        .map_err(|e| ShopclerkError::api_error(format!("Request failed: {}", e)))?;

    let status = response.status();
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.clone(),
        request_summary: "get_claude_response".to_string(),
        response_status: status.as_u16(),
        response_time_ms: start_time.elapsed().as_millis(),
    });

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ShopclerkError::api_error(format!(
            "API returned error: {} - {}",
            status, error_text
        )));
    }

    // Parse response
    let response_data: Value = response
        .json()
        .await
        .map_err(|e| ShopclerkError::api_error(format!("Failed to parse API response: {}", e)))?;

    // Check for API-reported errors
    if let Some(error) = response_data["error"].as_object() {
        return Err(ShopclerkError::api_error(format!(
            "{}: {}",
            error["type"].as_str().unwrap_or("unknown"),
            error["message"].as_str().unwrap_or("no message")
        )));
    }

    // Extract content and metadata
    let content = response_data["content"][0]["text"]
        .as_str()
        .ok_or_else(|| ShopclerkError::api_error("Response missing expected content"))?
        .to_string();

    let usage = if let (Some(input), Some(output)) = (
        response_data["usage"]["input_tokens"].as_u64(),
        response_data["usage"]["output_tokens"].as_u64(),
    ) {
        Some(TokenUsage {
            input_tokens: input as u32,
            output_tokens: output as u32,
        })
    } else {
        None
    };

    let api_response = ApiResponse { content, usage };

    // Cache the response
    API_CACHE
        .lock()
        .unwrap()
        .put(cache_key, api_response.clone());

    Ok(api_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config(base_url: String) -> Config {
        Config {
            api_key: "test-api-key".to_string(),
            api_base_url: base_url,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_claude_response_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"text": "This is a test response", "type": "text"}],
                "usage": {
                    "input_tokens": 10,
                    "output_tokens": 20
                }
            })))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let response = get_claude_response(&config, "hello", &[], "system prompt")
            .await
            .unwrap();

        assert_eq!(response.content, "This is a test response");
        let usage = response.usage.unwrap();
        assert_eq!(usage.input_tokens, 10);
        assert_eq!(usage.output_tokens, 20);
    }

    #[tokio::test]
    async fn test_claude_response_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let err = get_claude_response(&config, "http error input", &[], "system prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopclerkError::Api { .. }));
    }

    #[tokio::test]
    async fn test_claude_response_missing_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let err = get_claude_response(&config, "missing content input", &[], "system prompt")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("missing expected content"));
    }

    #[tokio::test]
    async fn test_token_threshold_rejects_oversized_input() {
        let mut config = test_config("http://unused.invalid".to_string());
        config.token_limit_threshold = 1;

        let err = get_claude_response(&config, "a long enough input", &[], "system prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopclerkError::Token { .. }));
    }

    #[tokio::test]
    async fn test_cache_distinguishes_system_prompts() {
        let mock_server = MockServer::start().await;

        // Same input under a different system prompt must not be served
        // from the cache, so the server sees both requests.
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"text": "ok", "type": "text"}]
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        get_claude_response(&config, "same input", &[], "prompt one")
            .await
            .unwrap();
        get_claude_response(&config, "same input", &[], "prompt two")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_response_is_cached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"text": "cached", "type": "text"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let first = get_claude_response(&config, "cache me", &[], "system prompt")
            .await
            .unwrap();
        let second = get_claude_response(&config, "cache me", &[], "system prompt")
            .await
            .unwrap();

        assert_eq!(first.content, second.content);
    }
}
