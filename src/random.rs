//! Seeded randomness for the decoration phase.
//!
//! [`JavaRandom`] is a 48-bit linear congruential generator whose output is bit-compatible with
//! `java.util.Random`, which vanilla world generation was written against, so identical seeds produce the
//! exact same feature placement. It also implements [`rand::RngCore`], so stages can use the
//! usual [`rand::Rng`] helpers when they don't care about that compatibility.

use rand::RngCore;

use crate::coords::ChunkCoordinate;

const MULTIPLIER: i64 = 0x5DEE_CE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

const X_SEED_FACTOR: i64 = 341_873_128_712;
const Z_SEED_FACTOR: i64 = 132_897_987_541;

/// Per-chunk seed, `x * 341873128712 + z * 132897987541` in wrapping 64-bit arithmetic.
#[inline]
pub fn chunk_seed(coord: ChunkCoordinate) -> i64 {
    (coord.x as i64)
        .wrapping_mul(X_SEED_FACTOR)
        .wrapping_add((coord.z as i64).wrapping_mul(Z_SEED_FACTOR))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JavaRandom {
    state: i64,
}

impl JavaRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: scramble(seed),
        }
    }

    #[inline]
    pub fn for_chunk(coord: ChunkCoordinate) -> Self {
        Self::new(chunk_seed(coord))
    }

    /// Reset the generator as if it was just constructed with `seed`.
    #[inline]
    pub fn set_seed(&mut self, seed: i64) {
        self.state = scramble(seed);
    }

    #[inline]
    fn next(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ADDEND)
            & MASK;

        (self.state >> (48 - bits)) as i32
    }

    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform integer in `[0, bound)`. Panics if `bound` isn't positive.
    pub fn next_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive, got {bound}");

        if bound & -bound == bound {
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }

        loop {
            let bits = self.next(31);
            let val = bits % bound;

            // Reject values from the incomplete last bucket so the result stays uniform.
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return val;
            }
        }
    }

    #[inline]
    pub fn next_long(&mut self) -> i64 {
        ((self.next(32) as i64) << 32).wrapping_add(self.next(32) as i64)
    }

    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next(1) != 0
    }

    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 / (1 << 24) as f32
    }

    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let high = (self.next(26) as i64) << 27;
        let low = self.next(27) as i64;

        (high + low) as f64 * (1.0 / (1i64 << 53) as f64)
    }
}

#[inline]
fn scramble(seed: i64) -> i64 {
    (seed ^ MULTIPLIER) & MASK
}

impl RngCore for JavaRandom {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.next_int() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn chunk_seed_formula() {
        let seed = chunk_seed(ChunkCoordinate::new(3, 4));
        assert_eq!(seed, 3 * 341_873_128_712 + 4 * 132_897_987_541);
        assert_eq!(seed, 1_557_211_336_300);

        assert_eq!(chunk_seed(ChunkCoordinate::new(0, 0)), 0);
        assert_eq!(chunk_seed(ChunkCoordinate::new(-1, 0)), -341_873_128_712);
    }

    #[test]
    fn chunk_seed_wraps_instead_of_overflowing() {
        let seed = chunk_seed(ChunkCoordinate::new(i32::MAX, i32::MIN));
        let expected = (i32::MAX as i64)
            .wrapping_mul(341_873_128_712)
            .wrapping_add((i32::MIN as i64).wrapping_mul(132_897_987_541));

        assert_eq!(seed, expected);
    }

    #[test]
    fn known_sequences() {
        let mut rng = JavaRandom::new(0);
        assert_eq!(rng.next_int(), -1_155_484_576);
        assert_eq!(rng.next_int(), -723_955_400);

        assert_eq!(JavaRandom::new(42).next_int_bounded(10), 0);
        assert_eq!(JavaRandom::new(0).next_int_bounded(100), 60);
        assert_eq!(JavaRandom::new(0).next_long(), -4_962_768_465_676_381_896);
        assert_eq!(JavaRandom::new(0).next_double(), 0.730_967_787_376_657);
    }

    #[test]
    fn chunk_rng_is_bit_exact() {
        let mut rng = JavaRandom::for_chunk(ChunkCoordinate::new(3, 4));
        let rolls = (0..4).map(|_| rng.next_int_bounded(16)).collect::<Vec<_>>();

        assert_eq!(rolls, vec![14, 5, 15, 4]);
    }

    #[test]
    fn reseeding_restarts_sequence() {
        let mut rng = JavaRandom::new(1234);
        let first = (0..8).map(|_| rng.next_int()).collect::<Vec<_>>();

        rng.set_seed(1234);
        let second = (0..8).map(|_| rng.next_int()).collect::<Vec<_>>();

        assert_eq!(first, second);
    }

    #[test]
    fn rng_core_adapter() {
        let mut rng = JavaRandom::new(7);
        for _ in 0..100 {
            let n: i32 = rng.gen_range(0..5);
            assert!((0..5).contains(&n));
        }

        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
    }
}
