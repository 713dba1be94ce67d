//! Walker configuration.
//!
//! [`WalkerConfig`] is the serializable description of a walk: where it
//! starts, the bounds it stays inside and how far one step may move. Recipes
//! embed it directly, and [`crate::RandomWalker::from_config`] validates it
//! before building a walker.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a bounded random walk.
///
/// # Example
/// ```
/// use randwalk::WalkerConfig;
///
/// let config = WalkerConfig::default()
///     .with_origin(100.0)
///     .with_bounds(80.0, 120.0)
///     .with_max_step_fraction(0.02);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Starting value
    pub origin: f32,
    /// Inclusive lower bound
    pub min: f32,
    /// Inclusive upper bound
    pub max: f32,
    /// Largest move of one step, as a fraction of the current value
    pub max_step_fraction: f32,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            origin: 100.0,
            min: 0.0,
            max: 200.0,
            max_step_fraction: 0.01,
        }
    }
}

impl WalkerConfig {
    pub fn new(origin: f32, min: f32, max: f32, max_step_fraction: f32) -> Self {
        Self { origin, min, max, max_step_fraction }
    }

    /// Set the starting value.
    pub fn with_origin(mut self, origin: f32) -> Self {
        self.origin = origin;
        self
    }

    /// Set both bounds.
    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the maximum step fraction.
    pub fn with_max_step_fraction(mut self, max_step_fraction: f32) -> Self {
        self.max_step_fraction = max_step_fraction;
        self
    }

    /// Check the configuration.
    ///
    /// Rejects non-finite fields, `min > max` and a negative step fraction.
    /// An origin outside the bounds is accepted; the walker clamps it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("origin", self.origin),
            ("min", self.min),
            ("max", self.max),
            ("max_step_fraction", self.max_step_fraction),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.min > self.max {
            return Err(ConfigError::InvertedBounds { min: self.min, max: self.max });
        }

        if self.max_step_fraction < 0.0 {
            return Err(ConfigError::NegativeStepFraction(self.max_step_fraction));
        }

        Ok(())
    }

    /// `origin` clamped into the bounds, low side first.
    pub(crate) fn clamped_origin(&self) -> f32 {
        clamp_low_then_high(self.origin, self.min, self.max)
    }
}

/// Clamp against `min`, then against `max`.
///
/// Unlike `f32::clamp` this never panics on `min > max`; it lands on `max`.
#[inline]
pub(crate) fn clamp_low_then_high(mut value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        value = min;
    }
    if value > max {
        value = max;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(WalkerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn builders_set_fields() {
        let config = WalkerConfig::default()
            .with_origin(10.0)
            .with_bounds(5.0, 15.0)
            .with_max_step_fraction(0.25);
        assert_eq!(config, WalkerConfig::new(10.0, 5.0, 15.0, 0.25));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = WalkerConfig::new(10.0, 15.0, 5.0, 0.1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds { min: 15.0, max: 5.0 })
        );
    }

    #[test]
    fn rejects_negative_fraction() {
        let config = WalkerConfig::new(10.0, 5.0, 15.0, -0.1);
        assert_eq!(config.validate(), Err(ConfigError::NegativeStepFraction(-0.1)));
    }

    #[test]
    fn rejects_non_finite_fields() {
        let config = WalkerConfig::new(10.0, f32::NEG_INFINITY, 15.0, 0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "min", .. })
        ));

        let config = WalkerConfig::new(f32::NAN, 5.0, 15.0, 0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "origin", .. })
        ));
    }

    #[test]
    fn origin_outside_bounds_is_accepted() {
        let config = WalkerConfig::new(50.0, 5.0, 15.0, 0.1);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.clamped_origin(), 15.0);
    }

    #[test]
    fn equal_bounds_are_valid() {
        assert_eq!(WalkerConfig::new(3.0, 3.0, 3.0, 0.5).validate(), Ok(()));
    }

    #[test]
    fn inverted_clamp_lands_on_max() {
        assert_eq!(clamp_low_then_high(0.0, 15.0, 5.0), 5.0);
        assert_eq!(clamp_low_then_high(10.0, 15.0, 5.0), 5.0);
        assert_eq!(clamp_low_then_high(20.0, 15.0, 5.0), 5.0);
    }

    #[test]
    fn deserializes_from_json() {
        let config: WalkerConfig = serde_json::from_str(
            r#"{"origin": 100, "min": 50, "max": 200, "max_step_fraction": 0.02}"#,
        )
        .unwrap();
        assert_eq!(config, WalkerConfig::new(100.0, 50.0, 200.0, 0.02));
    }
}
