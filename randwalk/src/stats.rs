//! Running summary of a walk.
//!
//! [`WalkStats`] consumes values one at a time, so it can follow an endless
//! walk without storing it. Mean and variance use Welford's method.

use serde::Serialize;

/// Summary statistics of a produced series.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WalkStats {
    /// Values recorded
    pub count: u64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest value seen
    pub lowest: Option<f32>,
    /// Largest value seen
    pub highest: Option<f32>,
    pub first: Option<f32>,
    pub last: Option<f32>,
    /// Steps that went up / down / nowhere
    pub ups: u64,
    pub downs: u64,
    pub flats: u64,
    /// Values sitting exactly on a bound (only counted when bounds are known)
    pub min_hits: u64,
    pub max_hits: u64,
    #[serde(skip)]
    bounds: Option<(f32, f32)>,
    #[serde(skip)]
    m2: f64,
}

impl WalkStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats that also count how often the walk sat on `min` or `max`.
    pub fn with_bounds(min: f32, max: f32) -> Self {
        Self {
            bounds: Some((min, max)),
            ..Self::default()
        }
    }

    /// Add one value.
    pub fn record(&mut self, value: f32) {
        if let Some(last) = self.last {
            if value > last {
                self.ups += 1;
            } else if value < last {
                self.downs += 1;
            } else {
                self.flats += 1;
            }
        } else {
            self.first = Some(value);
        }
        self.last = Some(value);

        self.lowest = Some(self.lowest.map_or(value, |low| low.min(value)));
        self.highest = Some(self.highest.map_or(value, |high| high.max(value)));

        if let Some((min, max)) = self.bounds {
            if value == min {
                self.min_hits += 1;
            }
            if value == max {
                self.max_hits += 1;
            }
        }

        self.count += 1;
        let x = value as f64;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.std_dev = (self.m2 / self.count as f64).sqrt();
    }

    /// Share of moves that went down, out of all moves that went somewhere.
    ///
    /// 0.5 for an unbiased walk away from its bounds. `None` before the
    /// first move.
    pub fn down_ratio(&self) -> Option<f64> {
        let moved = self.ups + self.downs;
        (moved > 0).then(|| self.downs as f64 / moved as f64)
    }
}

impl Extend<f32> for WalkStats {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for value in iter {
            self.record(value);
        }
    }
}
