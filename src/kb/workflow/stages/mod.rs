// SPDX-License-Identifier: MIT

//! Workflow stages
//!
//! - `RetrieveAndReason` - retrieval, answer generation and the confidence rule
//! - `SummarizeStage` - summary of the retrieved documents
//! - `escalation_notice` - fixed answer for human review

mod escalation;
mod retrieve;
mod summarize;

pub use escalation::escalation_notice;
pub use retrieve::{
    build_context, needs_escalation, reasoning_prompt, RetrievalOutput, RetrievalParams,
    RetrieveAndReason,
};
pub use summarize::{summary_prompt, SummarizeStage};

use crate::adk::retriever::Document;

/// Document contents in order, one per line
fn join_contents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
