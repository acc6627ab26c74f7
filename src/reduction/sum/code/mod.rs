//! Summation implementations.
//!
//! This module contains all implementation variants of array summation.

mod blocked;
mod in_place;
mod naive;
mod recursive;
mod two_way;
mod unrolled;

pub use blocked::{blocked_unrolled_sum, blocked_unrolled_sum_with, DEFAULT_BLOCK_SIZE};
pub use in_place::in_place_pairwise_sum;
pub use naive::naive_sum;
pub use recursive::{max_recursion_depth, recursive_pairwise_sum};
pub use two_way::two_way_sum;
pub use unrolled::{unrolled_sum_4, unrolled_sum_8};

pub(crate) use recursive::split_point;

use crate::utils::VariantInfo;

/// How a summation variant consumes its input.
#[derive(Clone, Copy)]
pub enum SumKernel {
    /// Reads the input only.
    Pure(fn(&[f64]) -> f64),
    /// Overwrites the buffer it is given.
    InPlace(fn(&mut [f64]) -> f64),
}

impl SumKernel {
    /// Evaluate once on `data`, copying it first for in-place kernels.
    pub fn evaluate(&self, data: &[f64]) -> f64 {
        match self {
            SumKernel::Pure(f) => f(data),
            SumKernel::InPlace(f) => {
                let mut scratch = data.to_vec();
                f(&mut scratch)
            }
        }
    }
}

/// Name of the reference variant.
pub const BASELINE: &str = "naive_sum";

/// Get all summation variants, baseline first
pub fn available_variants() -> Vec<VariantInfo<SumKernel>> {
    vec![
        VariantInfo {
            name: BASELINE,
            description: "Single accumulator, left to right",
            function: SumKernel::Pure(naive_sum),
        },
        VariantInfo {
            name: "two_way_sum",
            description: "Two interleaved accumulators",
            function: SumKernel::Pure(two_way_sum),
        },
        VariantInfo {
            name: "recursive_pairwise_sum",
            description: "Midpoint split, recursive pairwise reduction",
            function: SumKernel::Pure(recursive_pairwise_sum),
        },
        VariantInfo {
            name: "in_place_pairwise_sum",
            description: "Iterative pairwise folding on a private copy",
            function: SumKernel::InPlace(in_place_pairwise_sum),
        },
        VariantInfo {
            name: "unrolled_sum_4",
            description: "4 accumulators, 4 elements per step",
            function: SumKernel::Pure(unrolled_sum_4),
        },
        VariantInfo {
            name: "unrolled_sum_8",
            description: "8 accumulators, 8 elements per step",
            function: SumKernel::Pure(unrolled_sum_8),
        },
        VariantInfo {
            name: "blocked_unrolled_sum",
            description: "64 KiB blocks, 8-way unrolled inside each block",
            function: SumKernel::Pure(blocked_unrolled_sum),
        },
    ]
}
