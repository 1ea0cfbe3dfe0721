//! Planner CLI library.
//!
//! Argument parsing and command handlers for the `planner` binary. Every
//! command runs against the JSON file store in the state directory.

pub mod cli;
pub mod commands;
