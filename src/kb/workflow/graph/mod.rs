// SPDX-License-Identifier: MIT

//! Graph-based workflow execution
//!
//! This module provides the executor that walks the question-answering
//! graph, folding each node's output into the run state.

pub mod executor;
pub mod types;

pub use executor::{Execution, WorkflowGraph, WorkflowOutcome};
pub use types::{Node, Route, Transition};
