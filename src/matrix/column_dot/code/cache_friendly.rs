//! Row-outer traversal.

use crate::matrix::SquareMatrix;

/// Same product as [`naive_column_dot`](super::naive_column_dot), with the
/// loops swapped: for each row `i`, `v[i]` is held in a register and the
/// row is streamed into `result` sequentially.
///
/// `result` is zeroed before accumulation.
///
/// # Panics
/// Panics if `v` or `result` does not have `a.dim()` elements.
pub fn cache_friendly_column_dot(a: &SquareMatrix, v: &[f64], result: &mut [f64]) {
    let n = a.dim();
    assert_eq!(v.len(), n, "Vector length must match matrix dimension");
    assert_eq!(result.len(), n, "Result length must match matrix dimension");

    result.fill(0.0);

    for (row, &vi) in a.rows().zip(v) {
        for (r, &aij) in result.iter_mut().zip(row) {
            *r += aij * vi;
        }
    }
}
