//! # Reduction-Bench
//!
//! Micro-benchmarks of summation and column dot-product strategies, swept
//! across input sizes that straddle the L1, L2 and L3 cache capacities.
//!
//! Every variant is checked against its family's baseline before it is
//! timed; a disagreement is reported but does not stop the sweep.

pub mod equivalence;
pub mod error;
pub mod matrix;
pub mod reduction;
pub mod registry;
pub mod utils;

pub use error::{BenchError, Result};

/// Re-export tui from utils for convenience
pub use utils::tui;

/// Re-export the experiment driver
pub use utils::runner::{run_experiment, ExperimentConfig, ExperimentReport};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::equivalence::{EquivalenceReport, Tolerance};
    pub use crate::matrix::{column_dot, SquareMatrix};
    pub use crate::reduction::sum;
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
    pub use crate::utils::{CsvSink, ExperimentConfig, PinStrategy, TimingConfig};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_algorithms_registry_verify() {
        let registry = build_registry();
        let algorithms = registry.all();

        println!("Verifying {} algorithms...", algorithms.len());

        for algo in algorithms {
            println!("Verifying algorithm: {}", algo.name());
            match algo.verify() {
                Ok(_) => println!("  ✅ Algorithm '{}' passed verification", algo.name()),
                Err(e) => panic!(
                    "  ❌ Algorithm '{}' failed verification: {}",
                    algo.name(),
                    e
                ),
            }
        }
    }
}
