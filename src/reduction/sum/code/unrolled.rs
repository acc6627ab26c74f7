//! Manually unrolled summation.
//!
//! K independent accumulators let K additions be in flight at once instead
//! of one. Leftover elements (`len % K`) go into the first accumulator, and
//! the partial sums are combined pairwise at the end.

/// Sum with 4 accumulators, 4 elements per step.
pub fn unrolled_sum_4(data: &[f64]) -> f64 {
    let mut sum0 = 0.0;
    let mut sum1 = 0.0;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;

    let mut chunks = data.chunks_exact(4);
    for c in &mut chunks {
        sum0 += c[0];
        sum1 += c[1];
        sum2 += c[2];
        sum3 += c[3];
    }

    for &x in chunks.remainder() {
        sum0 += x;
    }

    (sum0 + sum1) + (sum2 + sum3)
}

/// Sum with 8 accumulators, 8 elements per step.
pub fn unrolled_sum_8(data: &[f64]) -> f64 {
    let mut sum0 = 0.0;
    let mut sum1 = 0.0;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    let mut sum4 = 0.0;
    let mut sum5 = 0.0;
    let mut sum6 = 0.0;
    let mut sum7 = 0.0;

    let mut chunks = data.chunks_exact(8);
    for c in &mut chunks {
        sum0 += c[0];
        sum1 += c[1];
        sum2 += c[2];
        sum3 += c[3];
        sum4 += c[4];
        sum5 += c[5];
        sum6 += c[6];
        sum7 += c[7];
    }

    for &x in chunks.remainder() {
        sum0 += x;
    }

    ((sum0 + sum1) + (sum2 + sum3)) + ((sum4 + sum5) + (sum6 + sum7))
}
