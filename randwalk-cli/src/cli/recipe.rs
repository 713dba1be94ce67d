//! Walk recipes.
//!
//! A recipe is a YAML file describing one walk, so a series can be checked in
//! and regenerated later:
//!
//! ```yaml
//! name: synthetic-price
//! walker:
//!   origin: 100
//!   min: 50
//!   max: 200
//!   max_step_fraction: 0.02
//! steps: 250
//! seed: 42
//! timestamps:
//!   start: 2024-01-01T00:00:00Z
//!   interval_secs: 60
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use randwalk::WalkerConfig;

use super::error::CliError;

/// A complete walk description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Walker parameters
    pub walker: WalkerConfig,

    /// Number of steps to take
    #[serde(default)]
    pub steps: Option<usize>,

    /// Seed for a replayable walk (None = clock-seeded)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Attach timestamps to the emitted values
    #[serde(default)]
    pub timestamps: Option<Timestamps>,
}

/// Evenly spaced timestamps for a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Time of the first emitted value
    pub start: DateTime<Utc>,

    /// Seconds between consecutive values
    #[serde(default = "default_interval")]
    pub interval_secs: u32,
}

fn default_interval() -> u32 {
    1
}

impl Timestamps {
    /// Timestamp of the value at `index`.
    ///
    /// `None` once the series runs past the dates chrono can represent.
    pub fn at(&self, index: usize) -> Option<DateTime<Utc>> {
        let secs = i64::from(self.interval_secs).checked_mul(i64::try_from(index).ok()?)?;
        self.start.checked_add_signed(TimeDelta::try_seconds(secs)?)
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CliError::RecipeRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| CliError::RecipeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a recipe from YAML text.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_recipe() {
        let yaml = r#"
name: synthetic-price
description: a day of minute bars
walker:
  origin: 100
  min: 50
  max: 200
  max_step_fraction: 0.02
steps: 250
seed: 42
timestamps:
  start: 2024-01-01T00:00:00Z
  interval_secs: 60
"#;
        let recipe = Recipe::parse(yaml).unwrap();
        assert_eq!(recipe.name, "synthetic-price");
        assert_eq!(recipe.walker, WalkerConfig::new(100.0, 50.0, 200.0, 0.02));
        assert_eq!(recipe.steps, Some(250));
        assert_eq!(recipe.seed, Some(42));

        let ts = recipe.timestamps.unwrap();
        assert_eq!(ts.interval_secs, 60);
        assert_eq!(ts.at(2).unwrap().to_rfc3339(), "2024-01-01T00:02:00+00:00");
    }

    #[test]
    fn parse_minimal_recipe() {
        let yaml = r#"
name: jitter
walker: { origin: 1, min: 0.5, max: 1.5, max_step_fraction: 0.1 }
"#;
        let recipe = Recipe::parse(yaml).unwrap();
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.steps, None);
        assert_eq!(recipe.seed, None);
        assert!(recipe.timestamps.is_none());
    }

    #[test]
    fn interval_defaults_to_one_second() {
        let yaml = r#"
name: ticks
walker: { origin: 1, min: 0, max: 2, max_step_fraction: 0.1 }
timestamps:
  start: 2024-06-01T12:00:00Z
"#;
        let ts = Recipe::parse(yaml).unwrap().timestamps.unwrap();
        assert_eq!(ts.interval_secs, 1);
    }

    #[test]
    fn far_future_timestamps_are_none() {
        let ts = Timestamps {
            start: "2024-01-01T00:00:00Z".parse().unwrap(),
            interval_secs: 4_000_000_000,
        };
        assert!(ts.at(1).is_some());
        assert_eq!(ts.at(3000), None);
        assert_eq!(ts.at(usize::MAX), None);
    }

    #[test]
    fn missing_walker_is_an_error() {
        assert!(Recipe::parse("name: broken\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Recipe::load("/nonexistent/recipe.yaml").unwrap_err();
        assert!(matches!(err, CliError::RecipeRead { .. }));
        assert!(err.to_string().contains("/nonexistent/recipe.yaml"));
    }
}
