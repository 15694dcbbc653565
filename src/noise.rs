//! Random multiplier sources for the generators.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

/// Seed offset for the price RNG so the two series are not correlated.
pub const PRICE_SEED_OFFSET: u64 = 57;

/// Source of the per-day and per-hour multipliers.
///
/// Generators draw through this trait so tests can pin every multiplier to a
/// known value.
pub trait NoiseSource {
    /// Returns a value drawn uniformly from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Returns a human-readable name for the source.
    fn source_type(&self) -> &'static str;
}

/// Uniform noise backed by a seeded [`StdRng`].
///
/// # Examples
///
/// ```
/// use grid_mockdata::noise::{NoiseSource, SeededNoise};
///
/// let mut a = SeededNoise::new(7);
/// let mut b = SeededNoise::new(7);
/// assert_eq!(a.uniform(0.9, 1.1), b.uniform(0.9, 1.1));
/// ```
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn source_type(&self) -> &'static str {
        "seeded"
    }
}

/// A source that ignores the requested range and always returns one value.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl Default for FixedNoise {
    fn default() -> Self {
        Self(1.0)
    }
}

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        self.0
    }

    fn source_type(&self) -> &'static str {
        "fixed"
    }
}

/// Inclusive bounds of a uniform multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseRange {
    pub min: f64,
    pub max: f64,
}

impl NoiseRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that always yields exactly 1.0.
    pub const fn unit() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Draws one multiplier from `noise`.
    pub fn draw(&self, noise: &mut dyn NoiseSource) -> f64 {
        noise.uniform(self.min, self.max)
    }
}

/// How a run perturbs its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseMode {
    /// Seeded uniform noise; each generator derives its own stream.
    Seeded(u64),
    /// Every multiplier is 1.0.
    Disabled,
}

impl NoiseMode {
    /// Builds the noise source for a generator, offsetting the seed by `offset`.
    pub fn source(self, offset: u64) -> Box<dyn NoiseSource> {
        match self {
            Self::Seeded(seed) => Box::new(SeededNoise::new(seed.wrapping_add(offset))),
            Self::Disabled => Box::new(FixedNoise::default()),
        }
    }
}

/// Draws a fresh seed from the thread-local entropy source.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}
