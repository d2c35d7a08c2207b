// SPDX-License-Identifier: MIT

//! Runtime configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables (a `.env` file is loaded by the binary first).

use crate::adk::error::KnowledgeError;
use crate::kb::workflow::stages::RetrievalParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Tunables for ingestion, retrieval and model selection
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of documents requested from the retriever
    pub top_k: i64,
    /// Distance below which a question is escalated
    pub threshold: f64,
    /// Target characters per ingested fragment
    pub chunk_size: usize,
    /// Characters shared between neighbouring fragments
    pub chunk_overlap: usize,
    pub chat_model: String,
    pub embedding_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_k: 4,
            threshold: 0.5,
            chunk_size: 500,
            chunk_overlap: 50,
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, KnowledgeError> {
        let mut settings = match path {
            Some(p) => Self::parse_yaml(&fs::read_to_string(p)?)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a YAML string; missing keys keep their defaults
    pub fn parse_yaml(content: &str) -> Result<Self, KnowledgeError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), KnowledgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("KF_TOP_K") {
            self.top_k = v
                .parse()
                .map_err(|_| KnowledgeError::config(format!("KF_TOP_K is not an integer: {}", v)))?;
        }
        if let Some(v) = lookup("KF_THRESHOLD") {
            self.threshold = v.parse().map_err(|_| {
                KnowledgeError::config(format!("KF_THRESHOLD is not a number: {}", v))
            })?;
        }
        if let Some(v) = lookup("CHAT_MODEL") {
            self.chat_model = v;
        }
        if let Some(v) = lookup("EMBEDDING_MODEL") {
            self.embedding_model = v;
        }
        Ok(())
    }

    /// Reject values that would fail later at ingestion or retrieval time
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        self.retrieval_params()?;

        if self.chunk_size == 0 {
            return Err(KnowledgeError::config("chunk_size must be positive"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(KnowledgeError::config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    pub fn retrieval_params(&self) -> Result<RetrievalParams, KnowledgeError> {
        Ok(RetrievalParams::new(self.top_k, self.threshold)?)
    }
}

/// Credentials and endpoint for OpenAI-compatible APIs
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl OpenAiSettings {
    /// Read `OPENAI_API_KEY` and `OPENAI_BASE_URL` from the environment
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Resolve an API path against the base URL, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> Result<Url, KnowledgeError> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(path)?)
    }
}
