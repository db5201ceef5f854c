//! Shared utilities

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// Source of uniformly distributed samples for ellipse outline drawing.
///
/// Implement this to replay a fixed sequence in tests.
pub trait SampleSource {
    /// Sample in `[min, max)`. Returns `min` when the range is empty.
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// Simple deterministic RNG using xorshift64
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Seeded from the process hasher keys, so every instance differs
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(0x9e37_79b9_7f4a_7c15);
        Self::new(hasher.finish())
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random f32 in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFF_FFFF) as f32 / 0x100_0000 as f32
    }

    /// Get a random f32 in [min, max)
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Get a random i32 in [min, max]
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let range = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + (self.next_u64() % range) as i64) as i32
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl SampleSource for Rng {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        // f32 rounding can land exactly on max for narrow ranges
        let v = self.range_f32(min, max);
        if v >= max {
            min
        } else {
            v
        }
    }
}
