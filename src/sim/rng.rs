//! Bounded random integers for spawn positions and speeds

use rand::Rng;

/// Uniform integer over `[min, max]` inclusive. Caller guarantees `min <= max`.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Uniform index into a non-empty collection of `len` elements
#[inline]
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    let max = i32::try_from(len.saturating_sub(1)).unwrap_or(i32::MAX);
    random_int(rng, 0, max) as usize
}
