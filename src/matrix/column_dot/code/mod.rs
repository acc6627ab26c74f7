//! Column dot-product implementations.

mod cache_friendly;
mod naive;

pub use cache_friendly::cache_friendly_column_dot;
pub use naive::naive_column_dot;

use crate::matrix::SquareMatrix;
use crate::utils::VariantInfo;

/// Type alias for the column dot-product signature: `(a, v, result)`.
pub type ColumnDotFn = fn(&SquareMatrix, &[f64], &mut [f64]);

/// Name of the reference variant.
pub const BASELINE: &str = "naive_column_dot";

/// Evaluate `f` into a freshly allocated result vector.
pub fn evaluate(f: ColumnDotFn, a: &SquareMatrix, v: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; a.dim()];
    f(a, v, &mut result);
    result
}

/// Get all column dot-product variants, baseline first
pub fn available_variants() -> Vec<VariantInfo<ColumnDotFn>> {
    vec![
        VariantInfo {
            name: BASELINE,
            description: "Column-outer loop, strided reads of A",
            function: naive_column_dot,
        },
        VariantInfo {
            name: "cache_friendly_column_dot",
            description: "Row-outer loop, sequential reads of A and result",
            function: cache_friendly_column_dot,
        },
    ]
}
