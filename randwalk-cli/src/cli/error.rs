//! Errors reported by CLI commands.

use std::io;
use std::path::PathBuf;

use randwalk::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("failed to read recipe {}: {source}", .path.display())]
    RecipeRead { path: PathBuf, source: io::Error },

    #[error("failed to parse recipe {}: {source}", .path.display())]
    RecipeParse { path: PathBuf, source: serde_yaml::Error },

    #[error("invalid walker configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("timestamp of step {0} is out of range")]
    TimestampOutOfRange(usize),

    #[error("{0} benchmark workers panicked")]
    WorkerPanicked(usize),

    #[error("{0} values escaped the walker bounds")]
    BoundsViolated(u64),
}
