// SPDX-License-Identifier: MIT

//! OpenAI Model - chat completions API implementation

use super::{Content, GenerationConfig, Model};
use crate::adk::error::KnowledgeError;
use crate::kb::config::OpenAiSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::error::Error;
use url::Url;

/// OpenAI-compatible chat model implementation
pub struct OpenAIModel {
    client: Client,
    api_key: String,
    model_name: String,
    endpoint: Url,
}

impl OpenAIModel {
    /// Create a new OpenAIModel
    ///
    /// Fails when no API key is configured or the base URL does not parse.
    pub fn new(
        settings: &OpenAiSettings,
        model_name: impl Into<String>,
    ) -> Result<Self, KnowledgeError> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| KnowledgeError::config("OPENAI_API_KEY must be set"))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model_name: model_name.into(),
            endpoint: settings.endpoint("chat/completions")?,
        })
    }

    /// Convert internal Content to OpenAI message format
    fn content_to_openai_message(content: &Content) -> serde_json::Value {
        let role = match content.role.as_str() {
            "model" => "assistant",
            other => other,
        };

        json!({
            "role": role,
            "content": content.text
        })
    }

    /// Build the request body for a chat completion
    fn request_body(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
    ) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = history
            .iter()
            .map(Self::content_to_openai_message)
            .collect();

        let mut body = json!({
            "model": self.model_name,
            "messages": messages
        });

        if let Some(cfg) = config {
            if let Some(temp) = cfg.temperature {
                body["temperature"] = json!(temp);
            }
            if let Some(max_tokens) = cfg.max_output_tokens {
                body["max_tokens"] = json!(max_tokens);
            }
            if let Some(top_p) = cfg.top_p {
                body["top_p"] = json!(top_p);
            }
        }

        body
    }

    /// Parse OpenAI response into Content
    fn parse_openai_response(response: &serde_json::Value) -> Result<Content, KnowledgeError> {
        let choice = response["choices"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| KnowledgeError::api("openai", "No choices in response"))?;

        // A null content is a legitimate empty completion
        let text = choice["message"]["content"].as_str().unwrap_or_default();

        Ok(Content::model(text))
    }
}

#[async_trait]
impl Model for OpenAIModel {
    async fn generate_content(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
    ) -> Result<Content, Box<dyn Error + Send + Sync>> {
        let body = self.request_body(history, config);

        log::debug!(
            "OpenAI request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(KnowledgeError::api("openai", text).into());
        }

        let resp_json: serde_json::Value = resp.json().await?;
        log::debug!("OpenAI response: {}", resp_json);

        Ok(Self::parse_openai_response(&resp_json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> OpenAiSettings {
        OpenAiSettings {
            api_key: Some("sk-test".to_string()),
            base_url: "https://api.example.com/v1".to_string(),
        }
    }

    #[test]
    fn test_content_to_openai_user_message() {
        let msg = OpenAIModel::content_to_openai_message(&Content::user("Hello"));
        assert_eq!(msg["role"], "user");
        assert_eq!(msg["content"], "Hello");
    }

    #[test]
    fn test_content_to_openai_assistant_message() {
        let msg = OpenAIModel::content_to_openai_message(&Content::model("I can help"));
        assert_eq!(msg["role"], "assistant");
        assert_eq!(msg["content"], "I can help");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let mut settings = settings();
        settings.api_key = None;

        let err = OpenAIModel::new(&settings, "gpt-3.5-turbo").err().unwrap();
        assert!(matches!(err, KnowledgeError::Config(_)));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let model = OpenAIModel::new(&settings(), "gpt-3.5-turbo").unwrap();
        assert_eq!(
            model.endpoint.as_str(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_includes_generation_config() {
        let model = OpenAIModel::new(&settings(), "gpt-3.5-turbo").unwrap();
        let config = GenerationConfig {
            temperature: Some(0.0),
            max_output_tokens: Some(256),
            top_p: None,
        };

        let body = model.request_body(&[Content::user("Hi")], Some(&config));
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["content"], "Hi");
        assert_eq!(body["max_tokens"], 256);
        assert!(body.get("top_p").is_none());
    }

    #[test]
    fn test_parse_openai_text_response() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hello, how can I help?"
                }
            }]
        });

        let content = OpenAIModel::parse_openai_response(&response).unwrap();
        assert_eq!(content.role, "model");
        assert_eq!(content.text, "Hello, how can I help?");
    }

    #[test]
    fn test_parse_openai_response_without_choices() {
        let response = json!({ "choices": [] });
        assert!(OpenAIModel::parse_openai_response(&response).is_err());
    }
}
