// SPDX-License-Identifier: MIT

//! OpenAI Embedder - embeddings API implementation

use super::Embedder;
use crate::adk::error::KnowledgeError;
use crate::kb::config::OpenAiSettings;
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use url::Url;

/// Inputs per request; larger uploads are split and sent concurrently
const BATCH_SIZE: usize = 64;

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

pub struct OpenAIEmbedder {
    client: Client,
    api_key: String,
    model_name: String,
    endpoint: Url,
}

impl OpenAIEmbedder {
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
            endpoint: settings.endpoint("embeddings")?,
        })
    }

    async fn embed_batch(
        &self,
        batch: &[String],
    ) -> Result<Vec<Vec<f32>>, Box<dyn Error + Send + Sync>> {
        let body = json!({
            "model": self.model_name,
            "input": batch
        });

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

        let parsed: EmbeddingResponse = resp.json().await?;
        Ok(Self::order_embeddings(parsed, batch.len())?)
    }

    /// The API may return entries out of order; sort by index and check count
    fn order_embeddings(
        mut response: EmbeddingResponse,
        expected: usize,
    ) -> Result<Vec<Vec<f32>>, KnowledgeError> {
        if response.data.len() != expected {
            return Err(KnowledgeError::api(
                "openai",
                format!(
                    "expected {} embeddings, received {}",
                    expected,
                    response.data.len()
                ),
            ));
        }
        response.data.sort_by_key(|d| d.index);
        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, Box<dyn Error + Send + Sync>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        log::info!(
            "Embedding {} texts in {} batches",
            texts.len(),
            texts.len().div_ceil(BATCH_SIZE)
        );

        let batches = try_join_all(texts.chunks(BATCH_SIZE).map(|b| self.embed_batch(b))).await?;
        Ok(batches.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_embeddings_sorts_by_index() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [
                { "index": 1, "embedding": [0.0, 1.0] },
                { "index": 0, "embedding": [1.0, 0.0] }
            ]
        }))
        .unwrap();

        let ordered = OpenAIEmbedder::order_embeddings(response, 2).unwrap();
        assert_eq!(ordered, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_order_embeddings_rejects_count_mismatch() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [{ "index": 0, "embedding": [1.0] }]
        }))
        .unwrap();

        assert!(OpenAIEmbedder::order_embeddings(response, 3).is_err());
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let settings = OpenAiSettings {
            api_key: Some("sk-test".to_string()),
            // Unroutable; any request would fail
            base_url: "http://127.0.0.1:9".to_string(),
        };
        let embedder = OpenAIEmbedder::new(&settings, "text-embedding-3-small").unwrap();

        assert!(embedder.embed(&[]).await.unwrap().is_empty());
    }
}
