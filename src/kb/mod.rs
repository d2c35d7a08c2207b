// SPDX-License-Identifier: MIT

pub mod config;
pub mod ingest;
pub mod server;
pub mod store;
pub mod workflow;
