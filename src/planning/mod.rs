//! Path planning over the explored-state graph.
//!
//! This module provides:
//! - A* shortest paths between `(cell, heading)` states
//! - The "return to origin" query over all four arrival headings
//! - Conversion of a state sequence into the actions that replay it

mod actions;
mod astar;

pub use actions::to_actions;
pub use astar::{path_home, shortest_path};
