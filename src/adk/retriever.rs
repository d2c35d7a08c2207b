// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// A retrieved content fragment with its relevance score.
///
/// Scores are distance-like: smaller means more relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub score: f64,
}

impl Document {
    pub fn new(content: impl Into<String>, score: f64) -> Self {
        Self {
            content: content.into(),
            score,
        }
    }
}

/// Trait for document stores that can be searched by the workflow.
///
/// Implementations must return at most `k` documents, best match first.
/// They must be safe to call from concurrent workflow invocations.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Document>, Box<dyn Error + Send + Sync>>;
}
