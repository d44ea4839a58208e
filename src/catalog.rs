// src/catalog.rs

use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::models::Product;
use std::collections::HashSet;
use std::fs;

/// The product catalog the retriever searches. Loaded once at startup;
/// read-only afterwards.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Loads the catalog from a JSON file. An unreadable, empty, or
    /// duplicate-ridden catalog aborts initialization.
    pub fn load(path: &str) -> ShopclerkResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ShopclerkError::initialization(format!("Failed to read catalog file {}: {}", path, e))
        })?;

        let products: Vec<Product> = serde_json::from_str(&contents).map_err(|e| {
            ShopclerkError::initialization(format!("Failed to parse catalog file {}: {}", path, e))
        })?;

        Catalog::from_products(products)
    }

    pub fn from_products(products: Vec<Product>) -> ShopclerkResult<Self> {
        if products.is_empty() {
            return Err(ShopclerkError::initialization("Catalog is empty"));
        }

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(ShopclerkError::initialization(format!(
                    "Duplicate product id in catalog: {}",
                    product.id
                )));
            }
        }

        Ok(Catalog { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Returns the `n` best lexical matches for a query, best first. Ties
    /// keep catalog order. Products that match nothing are excluded.
    pub fn top_matches(&self, query: &str, n: usize) -> Vec<&Product> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&Product, f32)> = self
            .products
            .iter()
            .filter_map(|product| {
                let score = score_product(product, &query_tokens);
                if score > 0.0 {
                    Some((product, score))
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n);
        scored.into_iter().map(|(product, _)| product).collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1)
        .map(str::to_string)
        .collect()
}

fn score_product(product: &Product, query_tokens: &[String]) -> f32 {
    let name_tokens = tokenize(&product.name);
    let category_tokens = tokenize(&product.category);
    let maker_tokens = tokenize(&product.maker);
    let description_tokens = tokenize(&product.description);

    let mut score = 0.0;
    for token in query_tokens {
        if name_tokens.contains(token) {
            score += 3.0;
        }
        if category_tokens.contains(token) {
            score += 2.0;
        }
        if maker_tokens.contains(token) {
            score += 2.0;
        }
        if description_tokens.contains(token) {
            score += 1.0;
        }
    }
    score
}
