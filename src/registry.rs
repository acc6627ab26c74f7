//! Algorithm registry for dynamic experiment discovery and execution.
//!
//! Each algorithm family (summation, column dot product) implements
//! [`AlgorithmRunner`]; the driver only talks to this trait, so one driver
//! runs every family.

use rand::rngs::StdRng;

use crate::equivalence::EquivalenceReport;
use crate::error::Result;
use crate::utils::bench::Sample;

/// A closure that runs one timed repetition of a variant.
pub struct VariantClosure<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// Returns (timing sample, optional result sample).
    /// Timing happens inside the closure so untimed setup (such as refreshing
    /// an in-place variant's scratch copy) stays out of the measurement.
    pub run: Box<dyn FnMut() -> (Sample, Option<f64>) + 'a>,
}

/// Everything the driver needs for one input size: the outcome of the
/// equivalence check and the closures to time.
pub struct PreparedSize<'a> {
    pub size: usize,
    pub equivalence: EquivalenceReport,
    pub variants: Vec<VariantClosure<'a>>,
}

/// Trait that all algorithm families must implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "sum")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "reduction", "matrix")
    fn category(&self) -> &'static str;

    /// Variant used as numerical reference and speedup baseline.
    fn baseline(&self) -> &'static str;

    /// Variant names in registration order (baseline first).
    fn available_variants(&self) -> Vec<&'static str>;

    /// Default size sweep, ascending.
    fn default_sizes(&self) -> Vec<usize>;

    /// Reject sizes this family cannot allocate, before any measurement.
    fn check_size(&self, _size: usize) -> Result<()> {
        Ok(())
    }

    /// Elements touched by one call at `size`, for cycles-per-element.
    fn elements(&self, size: usize) -> usize {
        size
    }

    /// Repetitions per variant during a sweep.
    fn default_repetitions(&self) -> usize;

    /// Repetitions per variant when a single size is requested.
    fn single_size_repetitions(&self) -> usize;

    /// Generate the input for `size`, check the `selected` variants for
    /// equivalence and hand back their timing closures.
    fn prepare<'a>(
        &'a self,
        size: usize,
        selected: &[&'static str],
        rng: &mut StdRng,
    ) -> Result<PreparedSize<'a>>;

    /// Self-test of every variant on fixed inputs.
    fn verify(&self) -> std::result::Result<(), String>;
}

/// Registry of all algorithm families
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Option<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithm families
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(crate::reduction::sum::SumRunner);
    registry.register(crate::matrix::column_dot::ColumnDotRunner);

    registry
}
