// SPDX-License-Identifier: MIT

//! Node and transition types for the question-answering graph
//!
//! ```text
//! START ─► retrieve_and_reason ─┬─► summarize ─► END
//!                               └─► human ─────► END
//! ```

use serde::Serialize;
use std::fmt;

/// A node in the workflow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    RetrieveAndReason,
    Summarize,
    Human,
}

impl Node {
    /// The node every run starts at
    pub const ENTRY: Node = Node::RetrieveAndReason;

    pub fn id(&self) -> &'static str {
        match self {
            Node::RetrieveAndReason => "retrieve_and_reason",
            Node::Summarize => "summarize",
            Node::Human => "human",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Outcome of the single branch after retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Summarize,
    Human,
}

impl Route {
    pub fn from_flag(needs_human: bool) -> Self {
        if needs_human {
            Route::Human
        } else {
            Route::Summarize
        }
    }

    pub fn target(self) -> Node {
        match self {
            Route::Summarize => Node::Summarize,
            Route::Human => Node::Human,
        }
    }
}

/// Where the executor goes after a node completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next(Node),
    End,
}
