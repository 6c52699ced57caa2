//! Deterministic RNG for scenario parameterisation.
//!
//! Catalog scenarios built with `randomize = true` perturb speeds and
//! distances from the run seed.  Child streams are derived with the
//! golden-ratio mixing constant so that adding a new randomised parameter
//! does not shift the values drawn for existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Scenario-level RNG.  Single-threaded; the tick loop never draws from it.
pub struct ScenarioRng(SmallRng);

impl ScenarioRng {
    pub fn new(seed: u64) -> Self {
        ScenarioRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `ScenarioRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> ScenarioRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        ScenarioRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `value` scaled by a uniform factor in `[1 - fraction, 1 + fraction]`.
    pub fn jitter(&mut self, value: f32, fraction: f32) -> f32 {
        let f = fraction.abs();
        if f == 0.0 {
            return value;
        }
        value * self.0.gen_range((1.0 - f)..=(1.0 + f))
    }
}
