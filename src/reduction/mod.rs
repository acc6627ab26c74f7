//! Scalar reductions over a single buffer.

pub mod sum;
