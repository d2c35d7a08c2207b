// SPDX-License-Identifier: MIT

//! Embedder module - turns text fragments into vectors
//!
//! Implementations:
//! - [openai] - OpenAI-compatible embeddings API

pub mod openai;

use async_trait::async_trait;
use std::error::Error;

/// Core trait for embedding models
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input in order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, Box<dyn Error + Send + Sync>>;
}
