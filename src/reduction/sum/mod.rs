//! # Array Summation
//!
//! Reduces a buffer of doubles to their sum:
//!
//! `sum(x) = Σ x[i]`
//!
//! ## Strategies compared
//!
//! - **Dependency chains**: one accumulator (`naive_sum`) vs. two, four or
//!   eight independent accumulators
//! - **Pairwise reduction**: recursive midpoint split vs. iterative in-place
//!   folding
//! - **Cache blocking**: 64 KiB blocks summed with 8-way unrolling
//!
//! All variants must agree with `naive_sum` within an absolute `1e-2`.

pub mod bench;
pub mod code;
pub mod test;

pub use code::*;

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::equivalence::{self, EquivalenceReport, Tolerance, VariantOutput};
use crate::error::Result;
use crate::registry::{AlgorithmRunner, PreparedSize};
use crate::utils::{select_variants, uniform_vec, VariantInfo};

/// Sampling range for summation inputs.
pub const VALUE_RANGE: (f64, f64) = (-100.0, 100.0);

/// Sizes (in doubles) straddling the L1d (~4 600), L2 (~330 000) and
/// L3 (~4 500 000) capacities, then well past them.
pub const DEFAULT_SIZES: &[usize] = &[
    1_024, 2_048, 3_000, 4_000, 4_600, 5_000, 6_000, 8_192, // L1d
    65_536, 131_072, 200_000, 262_144, 330_000, 350_000, 400_000, 524_288, // L2
    1_048_576, 2_097_152, 3_000_000, 4_000_000, 4_500_000, 5_000_000, 6_000_000, 8_388_608, // L3
    16_777_216, 33_554_432, 67_108_864, // DRAM
];

/// Evaluate every variant once on `data` and compare with the baseline.
///
/// `variants` must start with the baseline.
pub fn check_equivalence(variants: &[VariantInfo<SumKernel>], data: &[f64]) -> EquivalenceReport {
    let mut outputs = variants
        .iter()
        .map(|v| VariantOutput::scalar(v.name, v.function.evaluate(data)));

    let reference = outputs
        .next()
        .unwrap_or_else(|| VariantOutput::scalar(BASELINE, naive_sum(data)));
    equivalence::check(reference, outputs.collect(), Tolerance::SUMMATION)
}

/// Runner for the summation family
pub struct SumRunner;

impl AlgorithmRunner for SumRunner {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn description(&self) -> &'static str {
        "Sum of N doubles under different dependency-chain and blocking strategies"
    }

    fn category(&self) -> &'static str {
        "reduction"
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

    fn default_repetitions(&self) -> usize {
        3
    }

    fn single_size_repetitions(&self) -> usize {
        1000
    }

    fn prepare<'a>(
        &'a self,
        size: usize,
        selected: &[&'static str],
        rng: &mut StdRng,
    ) -> Result<PreparedSize<'a>> {
        let (low, high) = VALUE_RANGE;
        let data = Arc::new(uniform_vec(rng, size, low, high)?);
        let variants = select_variants(code::available_variants(), selected);

        let equivalence = check_equivalence(&variants, &data);
        let variants = bench::variant_closures(variants, &data);

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
