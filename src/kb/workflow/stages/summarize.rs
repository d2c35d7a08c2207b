// SPDX-License-Identifier: MIT

//! Summarization stage

use crate::adk::agent::Summarizer;
use crate::adk::retriever::Document;
use std::error::Error;
use std::sync::Arc;

use super::join_contents;

/// Prompt sent to the summarizer for already-joined document content
pub fn summary_prompt(content: &str) -> String {
    format!("Summarize:\n{}", content)
}

/// Condenses retrieved documents through the summarizer
#[derive(Clone)]
pub struct SummarizeStage {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizeStage {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Summarize documents in input order; output is returned verbatim
    pub async fn run(&self, documents: &[Document]) -> Result<String, Box<dyn Error + Send + Sync>> {
        let prompt = summary_prompt(&join_contents(documents));
        self.summarizer.generate(&prompt).await
    }
}
