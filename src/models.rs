// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message in the conversation log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in the conversation log. Immutable once created; the log is
/// append-only and insertion order is display order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub maker: String,
    pub price: u64,
    pub description: String,
    pub stock: u32,
}

/// What the retriever hands back for one query: the picked product, the
/// model's reasoning, and the rest of the shortlist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    pub reason: String,
    pub alternatives: Vec<Product>,
}

impl Recommendation {
    /// The assistant-side content recorded in the conversation log.
    pub fn log_content(&self) -> String {
        format!("{} — {}", self.product.name, self.reason)
    }
}

/// Details of one Claude API call, recorded in the log file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_log_content_includes_product_name() {
        let rec = Recommendation {
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
        };
        assert_eq!(rec.log_content(), "X1 Laptop — light and sturdy");
    }
}
