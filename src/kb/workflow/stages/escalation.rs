// SPDX-License-Identifier: MIT

//! Placeholder answer for questions routed to a human reviewer

/// Build the notice returned in place of a generated answer
pub fn escalation_notice(question: &str) -> String {
    format!("Further review required for question: {}", question)
}
