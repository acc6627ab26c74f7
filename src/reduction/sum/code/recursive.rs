//! Divide-and-conquer pairwise summation.

/// Sum by splitting at the midpoint and adding the two halves' sums.
///
/// The left half takes the extra element when the length is odd. Base cases
/// are the empty slice (0.0), a single element (returned as is) and a pair.
///
/// The recursion is at most [`max_recursion_depth`] frames deep, i.e.
/// `ceil(log2(N))` for `N >= 2`: 26 frames for 2^26 elements.
pub fn recursive_pairwise_sum(data: &[f64]) -> f64 {
    match data {
        [] => 0.0,
        [x] => *x,
        [x, y] => x + y,
        _ => {
            let (left, right) = data.split_at(split_point(data.len()));
            recursive_pairwise_sum(left) + recursive_pairwise_sum(right)
        }
    }
}

#[inline(always)]
pub(crate) fn split_point(len: usize) -> usize {
    len.div_ceil(2)
}

/// Number of nested calls [`recursive_pairwise_sum`] makes for `len`
/// elements, counting the outermost call.
pub const fn max_recursion_depth(len: usize) -> u32 {
    if len <= 2 {
        1
    } else {
        usize::BITS - (len - 1).leading_zeros()
    }
}
