//! Uniform random sources consumed by [`crate::RandomWalker`].
//!
//! A walker draws exactly one value in `[0, 1)` per step. Everything about
//! where that value comes from lives behind [`UniformSource`]:
//!
//! - [`ClockSource`] - `StdRng` seeded from the clock, the default
//! - [`RandSource`] - any `rand` generator you already have
//! - [`crate::Rng`] - small seeded LCG, stable across upgrades
//! - [`Constant`] / [`Scripted`] - test doubles
//! - [`SharedSource`] - one generator fanned out to several walkers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng as _, RngCore, SeedableRng};

/// Largest `f32` below 1.0.
pub const MAX_UNIFORM: f32 = 1.0 - 1.0 / 16_777_216.0;

/// Produces uniform values in `[0, 1)`.
///
/// `Send` is required because a walker may be stepped from any thread; the
/// walker's own lock serializes calls, so implementations don't need to be
/// `Sync`.
pub trait UniformSource: Send {
    /// Next value in `[0, 1)`.
    fn next_uniform(&mut self) -> f32;
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        (**self).next_uniform()
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        (**self).next_uniform()
    }
}

/// Adapter that turns any `rand` generator into a [`UniformSource`].
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use randwalk::{RandSource, RandomWalker};
///
/// let source = RandSource(StdRng::seed_from_u64(99));
/// let walker = RandomWalker::with_source(50.0, 0.0, 100.0, 0.1, source);
/// let value = walker.step();
/// assert!((0.0..=100.0).contains(&value));
/// ```
#[derive(Clone, Debug)]
pub struct RandSource<R>(pub R);

impl<R: RngCore + Send> UniformSource for RandSource<R> {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

static CLOCK_SEEDS: AtomicU64 = AtomicU64::new(0);

/// `StdRng` seeded from the high-resolution clock.
///
/// The clock reading is mixed with a process-wide counter, so two sources
/// created within the same clock tick still get different seeds.
#[derive(Clone, Debug)]
pub struct ClockSource {
    seed: u64,
    rng: StdRng,
}

impl ClockSource {
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let counter = CLOCK_SEEDS.fetch_add(1, Ordering::Relaxed);
        // Golden-ratio increment spreads consecutive counters across the seed space.
        let seed = nanos ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::from_seed(seed)
    }

    /// Rebuild the source a previous [`ClockSource::seed`] came from.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for ClockSource {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Always yields the same value, clamped into `[0, 1)`.
///
/// `Constant(0.0)` drives every step down by the full step size,
/// `Constant(0.5)` makes the walk stand still.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub f32);

impl UniformSource for Constant {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.0.clamp(0.0, MAX_UNIFORM)
    }
}

/// Replays a fixed list of values, cycling back to the start when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script yields 0.5, which
/// leaves the walk where it is.
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<f32>,
    index: usize,
}

impl Scripted {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }
}

impl UniformSource for Scripted {
    fn next_uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.index % self.values.len()];
        self.index = (self.index + 1) % self.values.len();
        value.clamp(0.0, MAX_UNIFORM)
    }
}

/// A source several walkers can draw from at once.
///
/// Clones share one underlying generator behind a mutex. Each walker's own
/// lock only covers that walker, so this lock is what keeps the shared
/// generator consistent.
///
/// ```
/// use randwalk::{RandomWalker, Rng, SharedSource};
///
/// let shared = SharedSource::new(Rng::new(3));
/// let a = RandomWalker::with_source(10.0, 0.0, 20.0, 0.1, shared.clone());
/// let b = RandomWalker::with_source(10.0, 0.0, 20.0, 0.1, shared);
/// // Interleaved draws: the walkers see different values from one stream.
/// assert_ne!(a.step(), b.step());
/// ```
#[derive(Debug)]
pub struct SharedSource<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedSource<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }
}

impl<S> Clone for SharedSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: UniformSource> UniformSource for SharedSource<S> {
    fn next_uniform(&mut self) -> f32 {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_uniform()
    }
}
