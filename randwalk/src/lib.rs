//! # randwalk
//!
//! Bounded, stateful random-walk value generator.
//!
//! A [`RandomWalker`] starts at an origin and, on every [`RandomWalker::step`],
//! moves by a random amount of at most `current * max_step_fraction` in either
//! direction, then clamps the result into `[min, max]`. The result wanders
//! smoothly inside its bounds, which suits synthetic price series, sensor
//! jitter and load generators. It is not Brownian motion: the step size scales
//! with the current value, not with elapsed time.
//!
//! Randomness is pluggable through [`UniformSource`], so tests and simulations
//! can swap the clock-seeded default for a seeded [`Rng`] or a scripted double.
//!
//! ```
//! use randwalk::{Constant, RandomWalker};
//!
//! let walker = RandomWalker::with_source(10.0, 5.0, 15.0, 0.25, Constant(0.0));
//! assert_eq!(walker.step(), 7.5);
//! assert_eq!(walker.step(), 5.625);
//! assert_eq!(walker.step(), 5.0);
//! ```

pub mod config;
pub mod error;
pub mod rng;
pub mod source;
pub mod stats;
pub mod walker;

// Re-export common types at crate root for convenience.
pub use config::WalkerConfig;
pub use error::ConfigError;
pub use rng::Rng;
pub use source::{ClockSource, Constant, RandSource, Scripted, SharedSource, UniformSource};
pub use stats::WalkStats;
pub use walker::{RandomWalker, Walk};
