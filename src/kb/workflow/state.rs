// SPDX-License-Identifier: MIT

//! Runtime state threaded through a workflow run
//!
//! Stages never mutate the state directly. Each returns a [`StateUpdate`]
//! and the executor folds it into the running [`WorkflowState`]: fields the
//! update carries overwrite, fields it leaves as `None` are preserved.

use crate::adk::retriever::Document;
use serde::Serialize;

/// Accumulated state of a single workflow invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowState {
    question: Option<String>,
    documents: Option<Vec<Document>>,
    answer: Option<String>,
    summary: Option<String>,
    needs_human: Option<bool>,
}

/// Partial output of one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub documents: Option<Vec<Document>>,
    pub answer: Option<String>,
    pub summary: Option<String>,
    pub needs_human: Option<bool>,
}

impl WorkflowState {
    /// Create the entry state for a question
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    /// Create a state with nothing set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge a stage's output into the state.
    ///
    /// `question` has no counterpart in [`StateUpdate`] and so can never
    /// change after entry. `needs_human` keeps its first value.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(documents) = update.documents {
            self.documents = Some(documents);
        }
        if let Some(answer) = update.answer {
            self.answer = Some(answer);
        }
        if let Some(summary) = update.summary {
            self.summary = Some(summary);
        }
        if let Some(flag) = update.needs_human {
            match self.needs_human {
                Some(existing) if existing != flag => {
                    log::warn!(
                        "Ignoring attempt to change needs_human from {} to {}",
                        existing,
                        flag
                    );
                }
                Some(_) => {}
                None => self.needs_human = Some(flag),
            }
        }
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    pub fn documents(&self) -> Option<&[Document]> {
        self.documents.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn needs_human(&self) -> Option<bool> {
        self.needs_human
    }

    /// Convert state to JSON object, omitting unset fields
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.retain(|_, v| !v.is_null());
        }
        value
    }
}
