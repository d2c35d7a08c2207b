// SPDX-License-Identifier: MIT

//! Graph workflow executor

use crate::adk::agent::{Reasoner, Summarizer};
use crate::adk::error::WorkflowError;
use crate::adk::retriever::{Document, Retriever};
use crate::kb::workflow::stages::{
    escalation_notice, RetrievalParams, RetrieveAndReason, SummarizeStage,
};
use crate::kb::workflow::state::{StateUpdate, WorkflowState};
use serde::Serialize;
use std::error::Error;
use std::sync::Arc;

use super::types::{Node, Route, Transition};

/// Caller-facing result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowOutcome {
    pub answer: String,
    pub summary: Option<String>,
    pub needs_human: bool,
}

/// Terminal state of a run plus the nodes executed to reach it
#[derive(Debug, Clone)]
pub struct Execution {
    pub state: WorkflowState,
    pub path: Vec<Node>,
}

impl Execution {
    pub fn outcome(&self) -> Result<WorkflowOutcome, WorkflowError> {
        Ok(WorkflowOutcome {
            answer: self
                .state
                .answer()
                .ok_or(WorkflowError::IncompleteState("answer"))?
                .to_string(),
            summary: self.state.summary().map(str::to_string),
            needs_human: self
                .state
                .needs_human()
                .ok_or(WorkflowError::IncompleteState("needs_human"))?,
        })
    }

    /// The branch taken after retrieval, if the run got that far
    pub fn route(&self) -> Option<Route> {
        self.path.iter().find_map(|node| match node {
            Node::Summarize => Some(Route::Summarize),
            Node::Human => Some(Route::Human),
            Node::RetrieveAndReason => None,
        })
    }
}

/// Question-answering workflow: retrieve and reason, then either summarize
/// or hand the question to a human.
///
/// One instance can serve concurrent invocations; each run gets its own
/// state and nothing is shared between runs except the collaborators.
#[derive(Clone)]
pub struct WorkflowGraph {
    retrieval: RetrieveAndReason,
    summarize: SummarizeStage,
    params: RetrievalParams,
}

impl WorkflowGraph {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        reasoner: Arc<dyn Reasoner>,
        summarizer: Arc<dyn Summarizer>,
        params: RetrievalParams,
    ) -> Self {
        Self {
            retrieval: RetrieveAndReason::new(retriever, reasoner),
            summarize: SummarizeStage::new(summarizer),
            params,
        }
    }

    pub fn params(&self) -> &RetrievalParams {
        &self.params
    }

    /// Answer a question and report whether it was escalated
    pub async fn run_workflow(
        &self,
        question: &str,
    ) -> Result<WorkflowOutcome, Box<dyn Error + Send + Sync>> {
        let execution = self.invoke(WorkflowState::new(question)).await?;
        Ok(execution.outcome()?)
    }

    /// Run the graph from an initial state to completion.
    ///
    /// Fails before any collaborator is called when the state has no
    /// question. Collaborator errors are returned as raised and no partial
    /// state is exposed.
    pub async fn invoke(
        &self,
        initial: WorkflowState,
    ) -> Result<Execution, Box<dyn Error + Send + Sync>> {
        let question = match initial.question() {
            Some(q) if !q.trim().is_empty() => q.to_string(),
            _ => return Err(WorkflowError::MissingQuestion.into()),
        };

        let mut state = initial;
        let mut path = Vec::with_capacity(2);
        let mut current = Some(Node::ENTRY);

        while let Some(node) = current {
            log::info!("Executing node: {}", node);
            let update = self.execute_node(node, &question, &state).await?;
            state.apply(update);
            path.push(node);

            current = match self.transition(node, &state)? {
                Transition::Next(next) => {
                    log::info!("Transition {} -> {}", node, next);
                    Some(next)
                }
                Transition::End => {
                    log::info!("Node {} completed, workflow finished", node);
                    None
                }
            };
        }

        Ok(Execution { state, path })
    }

    /// Run one node against the current state and return its partial output
    async fn execute_node(
        &self,
        node: Node,
        question: &str,
        state: &WorkflowState,
    ) -> Result<StateUpdate, Box<dyn Error + Send + Sync>> {
        match node {
            Node::RetrieveAndReason => {
                let output = self.retrieval.run_with(question, &self.params).await?;
                Ok(StateUpdate {
                    documents: Some(output.documents),
                    answer: Some(output.answer),
                    needs_human: Some(output.needs_human),
                    ..StateUpdate::default()
                })
            }
            Node::Summarize => {
                let documents: &[Document] = state.documents().unwrap_or_default();
                let summary = self.summarize.run(documents).await?;
                Ok(StateUpdate {
                    summary: Some(summary),
                    ..StateUpdate::default()
                })
            }
            Node::Human => Ok(StateUpdate {
                answer: Some(escalation_notice(question)),
                ..StateUpdate::default()
            }),
        }
    }

    /// Edges of the graph; the branch predicate is read exactly here
    fn transition(&self, node: Node, state: &WorkflowState) -> Result<Transition, WorkflowError> {
        match node {
            Node::RetrieveAndReason => {
                let needs_human = state
                    .needs_human()
                    .ok_or(WorkflowError::IncompleteState("needs_human"))?;
                Ok(Transition::Next(Route::from_flag(needs_human).target()))
            }
            Node::Summarize | Node::Human => Ok(Transition::End),
        }
    }
}
