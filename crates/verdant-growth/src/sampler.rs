//! Randomness seam for growth and seed rolls.
//!
//! Every stochastic decision in the engine goes through [`Sampler`], so a
//! host can drive the engine from its own world RNG and tests can pin
//! every roll. [`RngSampler`] adapts any [`rand::Rng`];
//! [`FixedSampler`] and [`ScriptedSampler`] are deterministic.

use std::collections::VecDeque;

use rand::Rng;

/// Source of uniform samples.
pub trait Sampler {
    /// A uniform sample in `[0, upper)`. Returns `0.0` if `upper` is not a
    /// positive finite number.
    fn uniform(&mut self, upper: f64) -> f64;

    /// A uniform integer in `[low, high]`. Returns `low` if `high <= low`.
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn uniform(&mut self, upper: f64) -> f64 {
        (**self).uniform(upper)
    }

    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        (**self).int_inclusive(low, high)
    }
}

// ---------------------------------------------------------------------------
// RngSampler
// ---------------------------------------------------------------------------

/// [`Sampler`] backed by a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

impl<R: Rng> RngSampler<R> {
    /// Wrap an RNG.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwrap the RNG.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Sampler for RngSampler<R> {
    fn uniform(&mut self, upper: f64) -> f64 {
        if upper.is_finite() && upper > 0.0 {
            self.rng.random_range(0.0..upper)
        } else {
            0.0
        }
    }

    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            low
        } else {
            self.rng.random_range(low..=high)
        }
    }
}

// ---------------------------------------------------------------------------
// FixedSampler
// ---------------------------------------------------------------------------

/// [`Sampler`] that returns the same values forever.
///
/// `uniform` returns `value` capped just below `upper`; `int_inclusive`
/// returns `int` clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSampler {
    value: f64,
    int: u32,
}

impl FixedSampler {
    /// A sampler returning `value` for uniform draws and `int` for integer
    /// draws.
    pub const fn new(value: f64, int: u32) -> Self {
        Self { value, int }
    }

    /// A sampler that always rolls the lowest possible value. Every enabled
    /// chance above zero succeeds; every zero chance fails.
    pub const fn zero() -> Self {
        Self::new(0.0, 0)
    }
}

impl Sampler for FixedSampler {
    fn uniform(&mut self, upper: f64) -> f64 {
        if upper.is_finite() && upper > 0.0 {
            self.value.clamp(0.0, upper * (1.0 - f64::EPSILON))
        } else {
            0.0
        }
    }

    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            low
        } else {
            self.int.clamp(low, high)
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedSampler
// ---------------------------------------------------------------------------

/// [`Sampler`] that replays queued values, then falls back to a
/// [`FixedSampler`].
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    uniforms: VecDeque<f64>,
    ints: VecDeque<u32>,
    fallback: FixedSampler,
}

impl ScriptedSampler {
    /// Replay `uniforms` and `ints` in order; once a queue runs dry, draws
    /// of that kind come from [`FixedSampler::zero`].
    pub fn new(uniforms: impl IntoIterator<Item = f64>, ints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            ints: ints.into_iter().collect(),
            fallback: FixedSampler::zero(),
        }
    }

    /// Number of queued uniform values not yet drawn.
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }
}

impl Sampler for ScriptedSampler {
    fn uniform(&mut self, upper: f64) -> f64 {
        self.uniforms
            .pop_front()
            .unwrap_or_else(|| self.fallback.uniform(upper))
    }

    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        match self.ints.pop_front() {
            Some(v) if high > low => v.clamp(low, high),
            Some(_) => low,
            None => self.fallback.int_inclusive(low, high),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn rng_sampler_stays_in_range() {
        let mut sampler = RngSampler::new(SmallRng::seed_from_u64(42));
        for _ in 0..1000 {
            let v = sampler.uniform(50.0);
            assert!((0.0..50.0).contains(&v));
            let i = sampler.int_inclusive(1, 3);
            assert!((1..=3).contains(&i));
        }
    }

    #[test]
    fn rng_sampler_degenerate_ranges() {
        let mut sampler = RngSampler::new(SmallRng::seed_from_u64(7));
        assert_eq!(sampler.uniform(0.0), 0.0);
        assert_eq!(sampler.uniform(-5.0), 0.0);
        assert_eq!(sampler.uniform(f64::INFINITY), 0.0);
        assert_eq!(sampler.int_inclusive(4, 4), 4);
        assert_eq!(sampler.int_inclusive(9, 2), 9);
    }

    #[test]
    fn rng_sampler_is_reproducible() {
        let mut a = RngSampler::new(SmallRng::seed_from_u64(99));
        let mut b = RngSampler::new(SmallRng::seed_from_u64(99));
        for _ in 0..20 {
            assert_eq!(a.uniform(100.0), b.uniform(100.0));
        }
    }

    #[test]
    fn fixed_sampler_caps_below_upper() {
        let mut sampler = FixedSampler::new(100.0, 10);
        assert!(sampler.uniform(100.0) < 100.0);
        assert_eq!(sampler.int_inclusive(1, 3), 3);
        assert_eq!(FixedSampler::zero().uniform(100.0), 0.0);
    }

    #[test]
    fn scripted_sampler_replays_then_falls_back() {
        let mut sampler = ScriptedSampler::new([12.5, 99.0], [2]);
        assert_eq!(sampler.uniform(100.0), 12.5);
        assert_eq!(sampler.remaining_uniforms(), 1);
        assert_eq!(sampler.uniform(100.0), 99.0);
        assert_eq!(sampler.uniform(100.0), 0.0);
        assert_eq!(sampler.int_inclusive(1, 3), 2);
        assert_eq!(sampler.int_inclusive(1, 3), 1);
    }

    #[test]
    fn mutable_reference_is_a_sampler() {
        fn draw(mut sampler: impl Sampler) -> f64 {
            sampler.uniform(10.0)
        }
        let mut inner = ScriptedSampler::new([3.0, 4.0], []);
        assert_eq!(draw(&mut inner), 3.0);
        assert_eq!(draw(&mut inner), 4.0);
    }
}
