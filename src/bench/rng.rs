//! Deterministic PRNG for synthesized dataset content.
//!
//! Manifest-driven datasets carry only shapes; matrix entries are
//! synthesized with a seeded `SplitMix64` so that runs are reproducible.

/// SplitMix64 PRNG.  Period 2^64, single u64 state.
pub struct SplitMix64(u64);

impl SplitMix64 {
    /// Create a new PRNG with the given seed.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw u64.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f64 in [0, 1).
    ///
    /// Uses the top 53 bits for a full mantissa.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Fill a slice with uniform [0, 1) values.
    pub fn fill_uniform(&mut self, data: &mut [f64]) {
        for x in data {
            *x = self.next_f64();
        }
    }
}
