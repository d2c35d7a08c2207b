// SPDX-License-Identifier: MIT

//! Retrieval-and-reasoning stage and the confidence rule

use crate::adk::agent::Reasoner;
use crate::adk::error::WorkflowError;
use crate::adk::retriever::{Document, Retriever};
use std::error::Error;
use std::sync::Arc;

use super::join_contents;

/// Validated retrieval settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalParams {
    k: usize,
    threshold: f64,
}

impl RetrievalParams {
    /// `k` must be positive; `threshold` must be a non-negative number
    pub fn new(k: i64, threshold: f64) -> Result<Self, WorkflowError> {
        if k <= 0 {
            return Err(WorkflowError::InvalidTopK(k));
        }
        if threshold.is_nan() || threshold < 0.0 {
            return Err(WorkflowError::InvalidThreshold(threshold));
        }
        let k = usize::try_from(k).map_err(|_| WorkflowError::InvalidTopK(k))?;
        Ok(Self { k, threshold })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            k: 4,
            threshold: 0.5,
        }
    }
}

/// Confidence rule: escalate when the best score is below the threshold.
///
/// An empty result scores `0.0`, so it escalates for every positive
/// threshold and never for a threshold of zero.
pub fn needs_escalation(documents: &[Document], threshold: f64) -> bool {
    let top = documents.first().map(|d| d.score).unwrap_or(0.0);
    top < threshold
}

/// Document contents in retrieved order, joined by line breaks
pub fn build_context(documents: &[Document]) -> String {
    join_contents(documents)
}

pub fn reasoning_prompt(question: &str, context: &str) -> String {
    format!("Question: {}\nContext:\n{}", question, context)
}

/// Result of one retrieval-and-reasoning pass
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalOutput {
    pub documents: Vec<Document>,
    pub answer: String,
    pub needs_human: bool,
}

/// Retrieves supporting documents, asks the reasoner for an answer and
/// decides whether the question needs a human
#[derive(Clone)]
pub struct RetrieveAndReason {
    retriever: Arc<dyn Retriever>,
    reasoner: Arc<dyn Reasoner>,
}

impl RetrieveAndReason {
    pub fn new(retriever: Arc<dyn Retriever>, reasoner: Arc<dyn Reasoner>) -> Self {
        Self {
            retriever,
            reasoner,
        }
    }

    /// Validate raw parameters, then run the stage
    pub async fn run(
        &self,
        question: &str,
        k: i64,
        threshold: f64,
    ) -> Result<RetrievalOutput, Box<dyn Error + Send + Sync>> {
        let params = RetrievalParams::new(k, threshold)?;
        self.run_with(question, &params).await
    }

    pub async fn run_with(
        &self,
        question: &str,
        params: &RetrievalParams,
    ) -> Result<RetrievalOutput, Box<dyn Error + Send + Sync>> {
        if question.trim().is_empty() {
            return Err(WorkflowError::MissingQuestion.into());
        }

        let documents = self.retriever.search(question, params.k()).await?;
        if documents.len() > params.k() {
            log::warn!(
                "Retriever returned {} documents for k={}",
                documents.len(),
                params.k()
            );
        }

        let context = build_context(&documents);
        let answer = self
            .reasoner
            .generate(&reasoning_prompt(question, &context))
            .await?;

        let needs_human = needs_escalation(&documents, params.threshold());
        log::info!(
            "Retrieved {} documents (top score {:?}), needs_human={}",
            documents.len(),
            documents.first().map(|d| d.score),
            needs_human
        );

        Ok(RetrievalOutput {
            documents,
            answer,
            needs_human,
        })
    }
}
