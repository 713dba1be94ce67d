//! Configuration errors.
//!
//! Stepping can't fail, so the only errors in the library come from
//! validating a [`crate::WalkerConfig`] before a walker is built from it.

use thiserror::Error;

/// Why a walker configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// The lower bound is above the upper bound.
    #[error("min ({min}) must not exceed max ({max})")]
    InvertedBounds { min: f32, max: f32 },

    /// The step fraction is below zero.
    #[error("max_step_fraction must be non-negative, got {0}")]
    NegativeStepFraction(f32),
}
