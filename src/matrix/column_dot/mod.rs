//! # Column Dot Product
//!
//! Multiplies the transpose of a square matrix with a vector:
//!
//! `result[j] = Σ_i A[i][j] * v[i]`
//!
//! With `A` stored row-major, the textbook column-outer loop reads `A` with
//! a stride of N doubles. Swapping the loops makes every read sequential
//! without changing the per-element summation order.

pub mod bench;
pub mod code;
pub mod test;

pub use code::*;

use std::sync::Arc;

use rand::rngs::StdRng;

use super::{element_count, SquareMatrix};
use crate::equivalence::{self, EquivalenceReport, Tolerance, VariantOutput};
use crate::error::Result;
use crate::registry::{AlgorithmRunner, PreparedSize};
use crate::utils::{select_variants, uniform_vec, VariantInfo};

/// Sampling range for matrix and vector entries.
pub const VALUE_RANGE: (f64, f64) = (0.0, 1.0);

/// Matrix dimensions whose N² footprint crosses L1d, L2 and L3.
pub const DEFAULT_SIZES: &[usize] = &[
    64, 128, 256, 400, 512, 768, 1_024, 1_500, 2_000, 2_048, 3_000, 4_096, 5_000,
];

/// Evaluate every variant once and compare with the baseline.
///
/// `variants` must start with the baseline.
pub fn check_equivalence(
    variants: &[VariantInfo<ColumnDotFn>],
    a: &SquareMatrix,
    v: &[f64],
) -> EquivalenceReport {
    let mut outputs = variants
        .iter()
        .map(|var| VariantOutput::vector(var.name, evaluate(var.function, a, v)));

    let reference = outputs
        .next()
        .unwrap_or_else(|| VariantOutput::vector(BASELINE, evaluate(naive_column_dot, a, v)));
    equivalence::check(reference, outputs.collect(), Tolerance::DOT_PRODUCT)
}

/// Runner for the column dot-product family
pub struct ColumnDotRunner;

impl AlgorithmRunner for ColumnDotRunner {
    fn name(&self) -> &'static str {
        "column_dot"
    }

    fn description(&self) -> &'static str {
        "Aᵀ·v on a row-major N×N matrix: column-outer vs. row-outer traversal"
    }

    fn category(&self) -> &'static str {
        "matrix"
    }

    fn baseline(&self) -> &'static str {
        BASELINE
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn default_sizes(&self) -> Vec<usize> {
        DEFAULT_SIZES.to_vec()
    }

    fn check_size(&self, size: usize) -> Result<()> {
        element_count(size).map(|_| ())
    }

    fn elements(&self, size: usize) -> usize {
        size.saturating_mul(size)
    }

    fn default_repetitions(&self) -> usize {
        10
    }

    fn single_size_repetitions(&self) -> usize {
        100
    }

    fn prepare<'a>(
        &'a self,
        size: usize,
        selected: &[&'static str],
        rng: &mut StdRng,
    ) -> Result<PreparedSize<'a>> {
        let (low, high) = VALUE_RANGE;
        let matrix = Arc::new(SquareMatrix::random(size, rng, low, high)?);
        let vector = Arc::new(uniform_vec(rng, size, low, high)?);
        let variants = select_variants(code::available_variants(), selected);

        let equivalence = check_equivalence(&variants, &matrix, &vector);
        let variants = bench::variant_closures(variants, &matrix, &vector);

        Ok(PreparedSize {
            size,
            equivalence,
            variants,
        })
    }

    fn verify(&self) -> std::result::Result<(), String> {
        test::verify_all()
    }
}
