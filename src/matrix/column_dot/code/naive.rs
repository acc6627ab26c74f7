//! Column-outer traversal.

use crate::matrix::SquareMatrix;

/// `result[j] = Σ_i a[i][j] * v[i]`, with `j` in the outer loop.
///
/// The inner loop walks down a column of a row-major matrix, touching a new
/// cache line on every step once a row no longer fits in cache.
///
/// `result` is zeroed before accumulation.
///
/// # Panics
/// Panics if `v` or `result` does not have `a.dim()` elements.
pub fn naive_column_dot(a: &SquareMatrix, v: &[f64], result: &mut [f64]) {
    let n = a.dim();
    assert_eq!(v.len(), n, "Vector length must match matrix dimension");
    assert_eq!(result.len(), n, "Result length must match matrix dimension");

    result.fill(0.0);

    let data = a.as_slice();
    for j in 0..n {
        for i in 0..n {
            result[j] += data[i * n + j] * v[i];
        }
    }
}
