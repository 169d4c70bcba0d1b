//! Random draws used by the randomized strategy branches.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of uniform draws in `[0, 1)`.
///
/// Strategy code only ever compares a draw against a fixed probability, so
/// this is all it needs. Tests substitute [`FixedSource`] to pin outcomes.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapter turning any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// OS-seeded generator for live play
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
#[derive(Clone, Debug)]
pub struct FixedSource {
    draws: Vec<f64>,
    next: usize,
}

impl FixedSource {
    /// An empty list behaves like a constant `0.0`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }

    /// Always returns `draw`.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_cycles() {
        let mut source = FixedSource::new([0.1, 0.9]);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.next_unit(), 0.9);
        assert_eq!(source.next_unit(), 0.1);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..10 {
            let draw = a.next_unit();
            assert!((0.0..1.0).contains(&draw));
            assert_eq!(draw, b.next_unit());
        }
    }
}
