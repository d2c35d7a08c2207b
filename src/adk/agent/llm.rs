// SPDX-License-Identifier: MIT

//! LLM Agent - single-turn prompt completion over a chat model
//!
//! The agent prepends its instruction as a system message, sends the prompt
//! as the user turn and returns the model text verbatim.

use super::{Reasoner, Summarizer};
use crate::adk::model::{Content, GenerationConfig, Model};
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

/// Standard LLM agent used as reasoner or summarizer
pub struct LLMAgent {
    pub name: String,
    pub instruction: String,
    pub model: Arc<dyn Model>,
    pub config: Option<GenerationConfig>,
}

impl LLMAgent {
    pub fn new(name: String, instruction: String, model: Arc<dyn Model>) -> Self {
        Self {
            name,
            instruction,
            model,
            config: None,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the conversation sent to the model
    fn history(&self, prompt: &str) -> Vec<Content> {
        let mut history = Vec::with_capacity(2);
        if !self.instruction.is_empty() {
            history.push(Content::system(self.instruction.clone()));
        }
        history.push(Content::user(prompt));
        history
    }

    /// Send one prompt and return the model text unchanged
    pub async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        log::info!("Agent {} sending prompt ({} chars)", self.name, prompt.len());

        let response = self
            .model
            .generate_content(&self.history(prompt), self.config.as_ref())
            .await?;

        log::info!(
            "Agent {} received response ({} chars)",
            self.name,
            response.text.len()
        );

        Ok(response.text)
    }
}

#[async_trait]
impl Reasoner for LLMAgent {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.complete(prompt).await
    }
}

#[async_trait]
impl Summarizer for LLMAgent {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.complete(prompt).await
    }
}
