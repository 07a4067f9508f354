//! Strength sampling policies.
//!
//! The bench resamples a contestant's strength on every call-up; how the
//! value is produced is a policy the monitors only see through this trait.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of contestant strength values.
pub trait StrengthPolicy: Send {
    fn sample(&mut self) -> u32;
}

/// Uniform strengths in `[min, max]`, seedable for reproducible matches.
pub struct UniformStrength {
    rng: ChaCha8Rng,
    min: u32,
    max: u32,
}

impl UniformStrength {
    pub fn new(min: u32, max: u32, seed: u64) -> UniformStrength {
        UniformStrength {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min,
            max,
        }
    }

    pub fn from_entropy(min: u32, max: u32) -> UniformStrength {
        UniformStrength {
            rng: ChaCha8Rng::from_entropy(),
            min,
            max,
        }
    }
}

impl StrengthPolicy for UniformStrength {
    fn sample(&mut self) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Always returns the same strength. Used for scripted scenarios.
pub struct FixedStrength(pub u32);

impl StrengthPolicy for FixedStrength {
    fn sample(&mut self) -> u32 {
        self.0
    }
}
