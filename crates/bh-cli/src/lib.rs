//! Billable hours planner CLI library.
//!
//! This crate provides the CLI interface for the billable hours planner.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DayOffAction, SetupAction, WeightAction};
pub use config::Config;
