// SPDX-License-Identifier: MIT

pub mod agent;
pub mod embedder;
pub mod error;
pub mod model;
pub mod retriever;
