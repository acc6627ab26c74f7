//! Baseline summation.

/// Sum left to right with a single accumulator.
///
/// Every addition depends on the previous one, so the loop runs at the
/// latency of one floating-point add per element. This is the reference
/// result for the whole family.
///
/// # Example
/// ```
/// use reduction_bench::reduction::sum::naive_sum;
///
/// assert_eq!(naive_sum(&[1.0, 2.0, 3.0]), 6.0);
/// assert_eq!(naive_sum(&[]), 0.0);
/// ```
pub fn naive_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in data {
        sum += x;
    }
    sum
}
