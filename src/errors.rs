// src/errors.rs

use crate::constants::{
    CONVERSATION_LOG_ERROR_MESSAGE, INITIALIZE_ERROR_MESSAGE, RENDER_ERROR_MESSAGE,
    RETRIEVAL_ERROR_MESSAGE,
};
use thiserror::Error;

/// All error kinds the assistant can produce. The first three map to the
/// turn pipeline (initialization is fatal, retrieval and rendering abandon
/// the current turn); the rest are ambient.
#[derive(Debug, Error)]
pub enum ShopclerkError {
    #[error("initialization failed: {detail}")]
    Initialization { detail: String },

    #[error("retrieval failed: {detail}")]
    Retrieval { detail: String },

    #[error("rendering failed: {detail}")]
    Render { detail: String },

    #[error("conversation log display failed: {detail}")]
    ConversationLog { detail: String },

    #[error("configuration error: {detail}")]
    Config { detail: String },

    #[error("api error: {detail}")]
    Api { detail: String },

    #[error("token limit exceeded: {detail}")]
    Token { detail: String },
}

pub type ShopclerkResult<T> = Result<T, ShopclerkError>;

impl ShopclerkError {
    pub fn initialization(detail: impl Into<String>) -> Self {
        ShopclerkError::Initialization {
            detail: detail.into(),
        }
    }

    pub fn retrieval(detail: impl Into<String>) -> Self {
        ShopclerkError::Retrieval {
            detail: detail.into(),
        }
    }

    pub fn render(detail: impl Into<String>) -> Self {
        ShopclerkError::Render {
            detail: detail.into(),
        }
    }

    pub fn conversation_log(detail: impl Into<String>) -> Self {
        ShopclerkError::ConversationLog {
            detail: detail.into(),
        }
    }

    pub fn config_error(detail: impl Into<String>) -> Self {
        ShopclerkError::Config {
            detail: detail.into(),
        }
    }

    pub fn api_error(detail: impl Into<String>) -> Self {
        ShopclerkError::Api {
            detail: detail.into(),
        }
    }

    pub fn token_error(detail: impl Into<String>) -> Self {
        ShopclerkError::Token {
            detail: detail.into(),
        }
    }

    /// Coerces any error into a retrieval failure. The turn handler treats
    /// every failure coming out of the retriever as total.
    pub fn into_retrieval(self) -> Self {
        match self {
            e @ ShopclerkError::Retrieval { .. } => e,
            other => ShopclerkError::Retrieval {
                detail: other.to_string(),
            },
        }
    }

    /// Coerces any startup failure into an initialization failure.
    pub fn into_initialization(self) -> Self {
        match self {
            e @ ShopclerkError::Initialization { .. } => e,
            other => ShopclerkError::Initialization {
                detail: other.to_string(),
            },
        }
    }

    /// The generic message shown to the user. Internal detail never leaks
    /// through this surface; it is logged server-side instead.
    pub fn user_message(&self) -> &'static str {
        match self {
            ShopclerkError::Retrieval { .. } => RETRIEVAL_ERROR_MESSAGE,
            ShopclerkError::Render { .. } => RENDER_ERROR_MESSAGE,
            ShopclerkError::ConversationLog { .. } => CONVERSATION_LOG_ERROR_MESSAGE,
            _ => INITIALIZE_ERROR_MESSAGE,
        }
    }
}
