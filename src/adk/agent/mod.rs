// SPDX-License-Identifier: MIT

//! Agent module - text generation collaborators for the workflow
//!
//! The workflow consumes two generation roles with the same shape:
//! - `Reasoner` - answers a question from assembled context
//! - `Summarizer` - condenses retrieved documents
//!
//! `LLMAgent` implements both on top of any [`Model`](crate::adk::model::Model).

mod llm;

pub use llm::LLMAgent;

use async_trait::async_trait;
use std::error::Error;

/// Generates an answer for a composed question-and-context prompt
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Generates a condensed summary for a prompt built from documents
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}
