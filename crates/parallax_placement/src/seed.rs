//! # Placement Seeds
//!
//! Every placement run draws from a ChaCha8 stream created from a
//! [`ScatterSeed`]. ChaCha output is specified bit-for-bit, so a seed
//! reproduces the same markers on any platform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScatterSeed(u64);

impl ScatterSeed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Creates the random stream for this seed.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}
