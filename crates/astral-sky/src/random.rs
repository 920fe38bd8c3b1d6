use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform unit draws used for every randomized spawn attribute.
///
/// Implementations return values in `[0, 1)`. Layers map these into their
/// ranges themselves, so a scripted source fully determines a generated scene.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// OS-seeded generator; different every run.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of unit draws, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`; an empty list yields `0.0` forever.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, next: 0 }
    }

    /// Number of values consumed so far (counting wrap-arounds).
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}
