//! Shared benchmark utilities.
//!
//! The measurement primitive (`measure!`), conversions of measured
//! durations, and the seeded input generators used by every experiment.

use std::time::Duration;

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{BenchError, Result};

/// Seed used when the caller does not pick one, so that generated test
/// vectors are identical from run to run.
pub const DEFAULT_SEED: u64 = 42;

/// One timed repetition: wall-clock time plus the cycle counter delta when
/// the platform has one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub elapsed: Duration,
    pub cycles: Option<u64>,
}

impl Sample {
    /// A sample with no cycle count.
    pub fn wall(elapsed: Duration) -> Self {
        Self {
            elapsed,
            cycles: None,
        }
    }
}

/// Time a single evaluation of an expression.
///
/// Returns `(Sample, result)`. The result goes through
/// [`std::hint::black_box`] before the clock is read again, so the
/// optimizer cannot drop the computation even when the caller ignores
/// the value.
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start_cycles = $crate::utils::cycles::read_cycles();
        let start = ::std::time::Instant::now();
        let result = ::std::hint::black_box($e);
        let elapsed = start.elapsed();
        let end_cycles = $crate::utils::cycles::read_cycles();
        (
            $crate::utils::bench::Sample {
                elapsed,
                cycles: $crate::utils::cycles::cycles_between(start_cycles, end_cycles),
            },
            result,
        )
    }};
}

/// Convert a duration to fractional microseconds.
pub fn to_micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1e6
}

/// Arithmetic mean of a set of samples, in microseconds.
pub fn mean_micros(samples: &[Duration]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total: f64 = samples.iter().map(|d| to_micros(*d)).sum();
    total / samples.len() as f64
}

/// Format a microsecond value for display (µs below a millisecond, ms above).
pub fn format_micros(us: f64) -> String {
    if us >= 1_000.0 {
        format!("{:.3} ms", us / 1_000.0)
    } else {
        format!("{:.2} µs", us)
    }
}

/// Ratio `baseline / variant`, guarded against zero-length measurements.
pub fn speedup(baseline_us: f64, variant_us: f64) -> f64 {
    if variant_us > 0.0 {
        baseline_us / variant_us
    } else if baseline_us > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

/// Create the experiment RNG from an explicit seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw `len` values uniformly from `[low, high)`.
pub fn uniform_vec(rng: &mut StdRng, len: usize, low: f64, high: f64) -> Result<Vec<f64>> {
    let dist = Uniform::new(low, high).map_err(|_| BenchError::InvalidRange { low, high })?;
    Ok((0..len).map(|_| dist.sample(rng)).collect())
}
