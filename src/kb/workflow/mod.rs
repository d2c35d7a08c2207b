// SPDX-License-Identifier: MIT

pub mod graph;
pub mod stages;
pub mod state;
