//! Experiment driver.
//!
//! Walks a size sweep for one algorithm family: generate the input, check
//! every selected variant for equivalence, time each one, compute speedups
//! against the baseline. A failed equivalence check is logged and recorded,
//! and the sweep moves on to the next size.

use log::{error, info};

use super::bench::{seeded_rng, speedup, DEFAULT_SEED};
use super::timer::{measure_variant, TimingConfig, VariantTiming};
use crate::equivalence::EquivalenceReport;
use crate::error::{BenchError, Result};
use crate::registry::{AlgorithmRunner, PreparedSize};

/// What to run for one algorithm family.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    /// Input sizes, in sweep order.
    pub sizes: Vec<usize>,
    pub timing: TimingConfig,
    /// Variants to run; `None` runs all of them. The baseline is always added.
    pub variants: Option<Vec<String>>,
    pub seed: u64,
}

impl ExperimentConfig {
    /// The family's default cache-straddling sweep.
    pub fn sweep(algo: &dyn AlgorithmRunner) -> Self {
        Self {
            sizes: algo.default_sizes(),
            timing: TimingConfig::with_repetitions(algo.default_repetitions()),
            variants: None,
            seed: DEFAULT_SEED,
        }
    }

    /// A single size, repeated as often as the family's single-run scripts.
    pub fn single(algo: &dyn AlgorithmRunner, size: usize) -> Self {
        Self {
            sizes: vec![size],
            timing: TimingConfig::with_repetitions(algo.single_size_repetitions()),
            variants: None,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_variants(mut self, variants: Vec<String>) -> Self {
        self.variants = Some(variants);
        self
    }

    /// Check the config against `algo` and resolve the variant selection.
    ///
    /// Returns the variants to run in registration order, baseline first.
    pub fn validate(&self, algo: &dyn AlgorithmRunner) -> Result<Vec<&'static str>> {
        self.timing.validate()?;
        if self.sizes.is_empty() {
            return Err(BenchError::EmptySweep);
        }
        for &size in &self.sizes {
            algo.check_size(size)?;
        }
        resolve_variants(algo, self.variants.as_deref())
    }
}

/// Map requested variant names onto the family's registered variants.
pub fn resolve_variants(
    algo: &dyn AlgorithmRunner,
    requested: Option<&[String]>,
) -> Result<Vec<&'static str>> {
    let available = algo.available_variants();
    let Some(requested) = requested else {
        return Ok(available);
    };

    if let Some(unknown) = requested
        .iter()
        .find(|r| !available.iter().any(|a| a == r))
    {
        return Err(BenchError::UnknownVariant {
            algorithm: algo.name(),
            variant: unknown.clone(),
            available: available.join(", "),
        });
    }

    let baseline = algo.baseline();
    Ok(available
        .into_iter()
        .filter(|a| *a == baseline || requested.iter().any(|r| r == a))
        .collect())
}

/// One (variant, size) measurement.
#[derive(Clone, Debug)]
pub struct BenchmarkResult {
    pub variant: &'static str,
    pub description: &'static str,
    pub size: usize,
    pub mean_time_us: f64,
    pub min_time_us: f64,
    pub max_time_us: f64,
    /// `baseline mean / this mean`; exactly 1.0 for the baseline itself.
    pub speedup_vs_baseline: f64,
    /// Mean cycle count divided by the elements one call touches; `None`
    /// without a cycle counter or for empty inputs.
    pub cycles_per_element: Option<f64>,
    pub result_sample: Option<f64>,
}

/// Everything measured at one size.
#[derive(Clone, Debug)]
pub struct SizeOutcome {
    pub size: usize,
    pub equivalence: EquivalenceReport,
    /// In variant order, baseline first.
    pub results: Vec<BenchmarkResult>,
}

impl SizeOutcome {
    pub fn is_equivalent(&self) -> bool {
        self.equivalence.passed()
    }
}

/// A finished sweep.
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    pub algorithm: &'static str,
    pub baseline: &'static str,
    pub variants: Vec<&'static str>,
    pub repetitions: usize,
    pub seed: u64,
    pub outcomes: Vec<SizeOutcome>,
}

impl ExperimentReport {
    /// Sizes whose equivalence check failed.
    pub fn divergent_sizes(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_equivalent())
            .map(|o| o.size)
            .collect()
    }

    pub fn results(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.outcomes.iter().flat_map(|o| o.results.iter())
    }
}

fn to_results(
    size: usize,
    elements: usize,
    baseline: &'static str,
    timings: Vec<VariantTiming>,
) -> Vec<BenchmarkResult> {
    let baseline_mean = timings
        .iter()
        .find(|t| t.name == baseline)
        .map(|t| t.mean_micros)
        .unwrap_or(0.0);

    timings
        .into_iter()
        .map(|t| BenchmarkResult {
            variant: t.name,
            description: t.description,
            size,
            min_time_us: t.min_micros(),
            max_time_us: t.max_micros(),
            speedup_vs_baseline: if t.name == baseline {
                1.0
            } else {
                speedup(baseline_mean, t.mean_micros)
            },
            cycles_per_element: t
                .mean_cycles()
                .filter(|_| elements > 0)
                .map(|c| c / elements as f64),
            mean_time_us: t.mean_micros,
            result_sample: t.result_sample,
        })
        .collect()
}

/// Run the full sweep for `algo`.
///
/// `on_size` is called after each size completes, in sweep order, so output
/// can be streamed; an error from it aborts the run. Equivalence failures do
/// not.
pub fn run_experiment<F>(
    algo: &dyn AlgorithmRunner,
    config: &ExperimentConfig,
    mut on_size: F,
) -> Result<ExperimentReport>
where
    F: FnMut(&SizeOutcome) -> Result<()>,
{
    let selected = config.validate(algo)?;
    let baseline = algo.baseline();
    let mut rng = seeded_rng(config.seed);
    let mut outcomes = Vec::with_capacity(config.sizes.len());

    for &size in &config.sizes {
        info!("{}: size {} ({} variants)", algo.name(), size, selected.len());

        let PreparedSize {
            equivalence,
            mut variants,
            ..
        } = algo.prepare(size, &selected, &mut rng)?;

        if !equivalence.passed() {
            error!(
                "{}: variants disagree with {} at size {}\n{}",
                algo.name(),
                baseline,
                size,
                equivalence
            );
        }

        let mut timings = Vec::with_capacity(variants.len());
        for variant in &mut variants {
            timings.push(measure_variant(variant, &config.timing)?);
        }

        let outcome = SizeOutcome {
            size,
            equivalence,
            results: to_results(size, algo.elements(size), baseline, timings),
        };
        on_size(&outcome)?;
        outcomes.push(outcome);
    }

    Ok(ExperimentReport {
        algorithm: algo.name(),
        baseline,
        variants: selected,
        repetitions: config.timing.repetitions,
        seed: config.seed,
        outcomes,
    })
}
