// SPDX-License-Identifier: MIT

//! In-memory vector store
//!
//! Fragments are embedded on insert and searched by Euclidean distance, so
//! lower scores mean closer matches. The index lives for the lifetime of the
//! process.

use crate::adk::embedder::Embedder;
use crate::adk::error::KnowledgeError;
use crate::adk::retriever::{Document, Retriever};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored, embedded fragment
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: Uuid,
    pub content: String,
    pub embedding: Vec<f32>,
    pub ingested_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct VectorStore {
    embedder: Arc<dyn Embedder>,
    fragments: Arc<RwLock<Vec<Fragment>>>,
}

impl VectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            fragments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Embed and index a batch of text fragments, returning their ids
    pub async fn add(&self, texts: Vec<String>) -> Result<Vec<Uuid>, Box<dyn Error + Send + Sync>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(KnowledgeError::api(
                "embedder",
                format!(
                    "returned {} vectors for {} texts",
                    embeddings.len(),
                    texts.len()
                ),
            )
            .into());
        }

        let now = Utc::now();
        let new: Vec<Fragment> = texts
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| Fragment {
                id: Uuid::new_v4(),
                content,
                embedding,
                ingested_at: now,
            })
            .collect();
        let ids = new.iter().map(|f| f.id).collect();

        let mut fragments = self.fragments.write().await;
        fragments.extend(new);
        log::info!("Indexed fragments, store now holds {}", fragments.len());

        Ok(ids)
    }

    pub async fn len(&self) -> usize {
        self.fragments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fragments.read().await.is_empty()
    }
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[async_trait]
impl Retriever for VectorStore {
    async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Document>, Box<dyn Error + Send + Sync>> {
        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| KnowledgeError::api("embedder", "no vector for query"))?;

        let fragments = self.fragments.read().await;

        let mut scored = Vec::with_capacity(fragments.len());
        for fragment in fragments.iter() {
            if fragment.embedding.len() != query_embedding.len() {
                return Err(KnowledgeError::api(
                    "embedder",
                    format!(
                        "dimension mismatch: query {} vs fragment {}",
                        query_embedding.len(),
                        fragment.embedding.len()
                    ),
                )
                .into());
            }
            scored.push(Document::new(
                fragment.content.clone(),
                euclidean_distance(&query_embedding, &fragment.embedding),
            ));
        }

        // Stable sort keeps insertion order among equal distances
        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(k);

        log::debug!("Search returned {} of {} fragments", scored.len(), fragments.len());
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Embeds text by its first bytes so distances are predictable
    struct LetterEmbedder;

    #[async_trait]
    impl Embedder for LetterEmbedder {
        async fn embed(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vec<f32>>, Box<dyn Error + Send + Sync>> {
            Ok(texts
                .iter()
                .map(|t| vec![t.bytes().next().unwrap_or(0) as f32, 0.0])
                .collect())
        }
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        async fn embed(
            &self,
            _texts: &[String],
        ) -> Result<Vec<Vec<f32>>, Box<dyn Error + Send + Sync>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean_distance(&[1.0], &[1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_add_and_search_orders_by_distance() {
        let store = VectorStore::new(Arc::new(LetterEmbedder));
        let ids = store
            .add(vec!["a".to_string(), "e".to_string(), "c".to_string()])
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.len().await, 3);

        let docs = store.search("b", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
        // "a" and "c" are both one step from "b"; insertion order breaks the tie
        assert_eq!(docs[0], Document::new("a", 1.0));
        assert_eq!(docs[1], Document::new("c", 1.0));
    }

    #[tokio::test]
    async fn test_search_returns_at_most_k() {
        let store = VectorStore::new(Arc::new(LetterEmbedder));
        store.add(vec!["x".to_string()]).await.unwrap();

        assert_eq!(store.search("x", 4).await.unwrap().len(), 1);
        assert!(store.search("x", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_returns_nothing() {
        let store = VectorStore::new(Arc::new(LetterEmbedder));
        assert!(store.is_empty().await);
        assert!(store.search("anything", 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_is_error() {
        let store = VectorStore::new(Arc::new(ShortEmbedder));
        assert!(store.add(vec!["a".to_string()]).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_index() {
        let store = VectorStore::new(Arc::new(LetterEmbedder));
        let cloned = store.clone();
        cloned.add(vec!["z".to_string()]).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
