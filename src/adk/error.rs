// SPDX-License-Identifier: MIT

//! Typed error handling for knowledge-flow
//!
//! Collaborator seams (retriever, reasoner, summarizer, embedder) return
//! `Box<dyn Error + Send + Sync>` so that their failures reach the caller
//! exactly as they were raised. The enums here cover everything the crate
//! itself can reject.

use thiserror::Error;

/// Top-level error type for knowledge-flow
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// API errors from external services (chat or embedding endpoints)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow-specific errors
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Invalid endpoint URL
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Errors raised by the orchestration core before any collaborator runs
#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    /// The initial state carried no question, or an empty one
    #[error("Workflow requires a non-empty question")]
    MissingQuestion,

    /// Retrieval count must be a positive integer
    #[error("Invalid retrieval count k={0}: must be positive")]
    InvalidTopK(i64),

    /// Confidence threshold must be a non-negative number
    #[error("Invalid confidence threshold {0}: must be non-negative")]
    InvalidThreshold(f64),

    /// A field every terminal state carries was never written
    #[error("Workflow state is missing field '{0}'")]
    IncompleteState(&'static str),
}

impl KnowledgeError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
