//! Utility modules for benchmarking and execution.

pub mod bench;
pub mod cpu_affinity;
pub mod csv;
pub mod cycles;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use bench::{seeded_rng, speedup, uniform_vec, Sample, DEFAULT_SEED};
pub use cpu_affinity::CpuPinGuard;
pub use csv::CsvSink;
pub use runner::{
    resolve_variants, run_experiment, BenchmarkResult, ExperimentConfig, ExperimentReport, SizeOutcome,
};
pub use timer::{measure_variant, time_mean, PinStrategy, TimingConfig, VariantTiming};

/// Information about an algorithm implementation variant.
/// Generic over F which is the function signature.
#[derive(Clone, Copy)]
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "naive_sum")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}

/// Keep the variants named in `selected`, preserving registration order.
pub fn select_variants<F>(all: Vec<VariantInfo<F>>, selected: &[&str]) -> Vec<VariantInfo<F>> {
    all.into_iter()
        .filter(|v| selected.contains(&v.name))
        .collect()
}
