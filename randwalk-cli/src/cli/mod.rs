//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `walk` - Generate a bounded random-walk series
//! - `stats` - Summarize a walk without printing it
//! - `benchmark` - Step one shared walker from many threads

pub mod common;
pub mod error;
pub mod recipe;
pub mod walk;
pub mod stats;
pub mod benchmark;

pub use error::CliError;
pub use walk::cmd_walk;
pub use stats::cmd_stats;
pub use benchmark::cmd_benchmark;
