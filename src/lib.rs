// SPDX-License-Identifier: MIT

//! knowledge-flow answers questions from an indexed document store,
//! escalating to a human reviewer when retrieval confidence is low.
//!
//! - [`adk`] - collaborator traits (retriever, reasoner, summarizer,
//!   embedder, chat model) and their OpenAI-compatible implementations
//! - [`kb`] - configuration, ingestion, the vector store, the workflow
//!   graph and the HTTP server

pub mod adk;
pub mod kb;
