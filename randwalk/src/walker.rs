//! The bounded random walker.
//!
//! Each [`RandomWalker::step`] moves the current value by a uniformly random
//! amount in `[-current * fraction, +current * fraction)` and clamps the result
//! into `[min, max]`. Because the step scales with the current value, the walk
//! takes small steps near zero and large ones far from it.
//!
//! ## Thread safety
//!
//! `step` takes `&self`. The current value and the random source sit behind
//! one mutex, and a whole step (read, draw, move, clamp) runs while holding
//! it. Share a walker with `Arc` or scoped threads and step it from anywhere.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use log::{debug, trace, warn};

use crate::config::{WalkerConfig, clamp_low_then_high};
use crate::error::ConfigError;
use crate::source::{ClockSource, UniformSource};

/// State that changes on every step.
struct State<S> {
    current: f32,
    source: S,
}

/// One bounded random walk.
///
/// The bounds and the step fraction are fixed at construction. The source is
/// owned by the walker and never handed back out.
pub struct RandomWalker<S = ClockSource> {
    min: f32,
    max: f32,
    max_step_fraction: f32,
    state: Mutex<State<S>>,
}

impl RandomWalker<ClockSource> {
    /// Create a walker with a clock-seeded source.
    ///
    /// Nothing is validated: `min > max` makes every step return `max`, and
    /// a fraction of zero freezes the walk at the (clamped) origin.
    pub fn new(origin: f32, min: f32, max: f32, max_step_fraction: f32) -> Self {
        Self::with_source(origin, min, max, max_step_fraction, ClockSource::new())
    }

    /// Create a walker with a clock-seeded source after validating `config`.
    pub fn from_config(config: &WalkerConfig) -> Result<Self, ConfigError> {
        Self::from_config_with_source(config, ClockSource::new())
    }
}

impl<S: UniformSource> RandomWalker<S> {
    /// Create a walker that draws from `source`.
    ///
    /// Like [`RandomWalker::new`], this accepts any numbers. Inconsistent
    /// input is logged, not rejected.
    pub fn with_source(origin: f32, min: f32, max: f32, max_step_fraction: f32, source: S) -> Self {
        let config = WalkerConfig::new(origin, min, max, max_step_fraction);
        if let Err(e) = config.validate() {
            warn!("random walker built from inconsistent configuration: {}", e);
        }
        Self::build(&config, source)
    }

    /// Create a walker that draws from `source` after validating `config`.
    pub fn from_config_with_source(config: &WalkerConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, source))
    }

    fn build(config: &WalkerConfig, source: S) -> Self {
        let current = config.clamped_origin();
        debug!(
            "random walker: origin={} bounds=[{}, {}] max_step_fraction={}",
            current, config.min, config.max, config.max_step_fraction
        );

        Self {
            min: config.min,
            max: config.max,
            max_step_fraction: config.max_step_fraction,
            state: Mutex::new(State { current, source }),
        }
    }

    /// Advance the walk by one step and return the new value.
    ///
    /// Never fails. A panic in another thread can't leave the state half
    /// updated, so a poisoned lock is simply taken over.
    pub fn step(&self) -> f32 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let max_dynamic = state.current * self.max_step_fraction;
        let u = state.source.next_uniform();
        let moved = state.current + (u * 2.0 - 1.0) * max_dynamic;
        // An overflowing step size times a zero draw is NaN, which no clamp catches.
        if !moved.is_nan() {
            state.current = clamp_low_then_high(moved, self.min, self.max);
        }

        trace!("step: u={} moved={} current={}", u, moved, state.current);
        state.current
    }

    /// Take `n` steps and collect the values.
    ///
    /// Other threads stepping the same walker may interleave with these.
    pub fn steps(&self, n: usize) -> Vec<f32> {
        self.walk().take(n).collect()
    }

    /// Endless iterator of steps.
    pub fn walk(&self) -> Walk<'_, S> {
        Walk { walker: self }
    }
}

impl<S> RandomWalker<S> {
    /// The latest value, without stepping.
    pub fn current(&self) -> f32 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).current
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn max_step_fraction(&self) -> f32 {
        self.max_step_fraction
    }

    /// Configuration that would resume this walk from where it is now.
    pub fn config(&self) -> WalkerConfig {
        WalkerConfig::new(self.current(), self.min, self.max, self.max_step_fraction)
    }
}

impl<S> fmt::Debug for RandomWalker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomWalker")
            .field("current", &self.current())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("max_step_fraction", &self.max_step_fraction)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`RandomWalker::walk`]. Never ends.
pub struct Walk<'a, S> {
    walker: &'a RandomWalker<S>,
}

impl<S: UniformSource> Iterator for Walk<'_, S> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.walker.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
