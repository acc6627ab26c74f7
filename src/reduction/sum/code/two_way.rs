//! Two interleaved accumulators.

/// Sum with two independent dependency chains.
///
/// Even positions go to the first accumulator, odd positions to the second.
/// An unpaired final element is added to the first accumulator.
pub fn two_way_sum(data: &[f64]) -> f64 {
    let mut sum1 = 0.0;
    let mut sum2 = 0.0;

    let mut pairs = data.chunks_exact(2);
    for pair in &mut pairs {
        sum1 += pair[0];
        sum2 += pair[1];
    }

    if let [last] = pairs.remainder() {
        sum1 += last;
    }

    sum1 + sum2
}
