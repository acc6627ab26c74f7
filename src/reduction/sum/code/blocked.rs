//! Cache-blocked, 8-way unrolled summation.

use super::{naive_sum, unrolled_sum_8};

/// 8192 doubles = 64 KiB per block, sized for a per-core L1d/L2 slice.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Inputs this small are summed directly; blocking only adds overhead.
const SMALL_INPUT: usize = 16;

/// [`blocked_unrolled_sum_with`] using [`DEFAULT_BLOCK_SIZE`].
pub fn blocked_unrolled_sum(data: &[f64]) -> f64 {
    blocked_unrolled_sum_with(data, DEFAULT_BLOCK_SIZE)
}

/// Split `data` into contiguous blocks of `block_size` elements (the last
/// one may be shorter), sum each block with 8-way unrolling and accumulate
/// the block sums.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn blocked_unrolled_sum_with(data: &[f64], block_size: usize) -> f64 {
    assert!(block_size > 0, "block size must be positive");

    if data.len() <= SMALL_INPUT {
        return naive_sum(data);
    }

    let mut total = 0.0;
    for block in data.chunks(block_size) {
        total += unrolled_sum_8(block);
    }
    total
}
