// src/retriever.rs

use crate::api::get_claude_response;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::models::{Message, Product, Recommendation};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "You are a shop assistant. From the candidate products provided, \
pick the single best match for the customer's request and explain why in one or two sentences. \
Use the conversation so far to interpret follow-up requests. \
Reply in exactly this format:\nproduct_id: <id>\nreason: <text>";

static PRODUCT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*product_id:\s*(\S+)").unwrap()
});
static REASON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^\s*reason:\s*(.+)\z").unwrap()
});

/// The retrieval seam of the turn pipeline. The handler only sees this
/// trait; any failure behind it abandons the turn. `history` is the
/// conversation log so far, so follow-up requests keep their context.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn invoke(&self, query: &str, history: &[Message]) -> ShopclerkResult<Recommendation>;
}

/// Production retriever: lexical shortlist over the catalog, then one
/// Claude call to pick and justify a product.
#[derive(Debug)]
pub struct CatalogRetriever {
    catalog: Catalog,
    shortlist_size: usize,
    config: Config,
}

impl CatalogRetriever {
    pub fn new(catalog: Catalog, shortlist_size: usize, config: Config) -> Self {
        CatalogRetriever {
            catalog,
            shortlist_size,
            config,
        }
    }

    fn build_prompt(shortlist: &[&Product], query: &str) -> String {
        let mut prompt = format!("Customer request: {}\n\nCandidate products:\n", query);
        for product in shortlist {
            prompt.push_str(&format!(
                "- id: {} | name: {} | category: {} | maker: {} | price: {} | stock: {} | {}\n",
                product.id,
                product.name,
                product.category,
                product.maker,
                product.price,
                product.stock,
                product.description
            ));
        }
        prompt
    }

    /// Parses the model reply into a picked product plus reason. An
    /// unknown or missing id falls back to the shortlist's best match,
    /// with the raw reply as the reason.
    fn parse_reply(shortlist: &[&Product], reply: &str) -> (Product, String) {
        let picked = PRODUCT_ID_RE
            .captures(reply)
            .and_then(|caps| {
                let id = caps.get(1).map(|m| m.as_str())?;
                shortlist.iter().find(|p| p.id == id).copied()
            })
            .unwrap_or(shortlist[0]);

        let reason = REASON_RE
            .captures(reply)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .unwrap_or_else(|| reply.trim().to_string());

        (picked.clone(), reason)
    }
}

#[async_trait]
impl Retriever for CatalogRetriever {
    async fn invoke(&self, query: &str, history: &[Message]) -> ShopclerkResult<Recommendation> {
        let shortlist = self.catalog.top_matches(query, self.shortlist_size);
        if shortlist.is_empty() {
            return Err(ShopclerkError::retrieval(format!(
                "No catalog entries match the query: {}",
                query
            )));
        }

        let history_values: Vec<Value> = history
            .iter()
            .map(|m| json!({ "role": m.role.to_string(), "content": m.content }))
            .collect();

        let prompt = CatalogRetriever::build_prompt(&shortlist, query);
        let response = get_claude_response(&self.config, &prompt, &history_values, SYSTEM_PROMPT)
            .await
            .map_err(ShopclerkError::into_retrieval)?;

        let (product, reason) = CatalogRetriever::parse_reply(&shortlist, &response.content);
        let alternatives = shortlist
            .iter()
            .filter(|p| p.id != product.id)
            .map(|p| (*p).clone())
            .collect();

        Ok(Recommendation {
            product,
            reason,
            alternatives,
        })
    }
}
