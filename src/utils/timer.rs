//! Timing harness.
//!
//! Runs a unit of work a fixed number of times, one after another, records the
//! wall-clock time of every repetition and reports the mean. Nothing is kept
//! between calls. A panic inside the unit of work is not caught: a broken
//! benchmark stops the run.

use std::time::Duration;

use log::debug;

use super::bench::{mean_micros, to_micros, Sample};
use super::cpu_affinity::CpuPinGuard;
use crate::error::{BenchError, Result};
use crate::registry::VariantClosure;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Leave scheduling to the OS.
    Off,
    /// Pin once around all repetitions of a variant.
    #[default]
    Global,
    /// Pin/unpin around each repetition.
    PerRepetition,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Timed repetitions per variant (default: 3)
    pub repetitions: usize,
    /// Untimed runs before measuring (default: 0)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: Global)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            repetitions: 3,
            warmup_iterations: 0,
            pin_strategy: PinStrategy::default(),
        }
    }
}

impl TimingConfig {
    pub fn with_repetitions(repetitions: usize) -> Self {
        Self {
            repetitions,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::ZeroRepetitions);
        }
        Ok(())
    }
}

/// Measurements of one variant at one size.
#[derive(Clone, Debug)]
pub struct VariantTiming {
    pub name: &'static str,
    pub description: &'static str,
    /// One entry per timed repetition, in execution order.
    pub samples: Vec<Duration>,
    /// Cycle counts per repetition; empty when the counter is unavailable.
    pub cycles: Vec<u64>,
    pub mean_micros: f64,
    /// Result of the last repetition, for display.
    pub result_sample: Option<f64>,
}

impl VariantTiming {
    pub fn min_micros(&self) -> f64 {
        self.samples.iter().min().map(|d| to_micros(*d)).unwrap_or(0.0)
    }

    pub fn max_micros(&self) -> f64 {
        self.samples.iter().max().map(|d| to_micros(*d)).unwrap_or(0.0)
    }

    pub fn mean_cycles(&self) -> Option<f64> {
        if self.cycles.is_empty() {
            return None;
        }
        Some(self.cycles.iter().map(|&c| c as f64).sum::<f64>() / self.cycles.len() as f64)
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Run `run` for the configured warm-up and repetitions, collecting the
/// sample each call reports.
fn collect_samples<F>(config: &TimingConfig, mut run: F) -> Result<(Vec<Sample>, Option<f64>)>
where
    F: FnMut() -> (Sample, Option<f64>),
{
    config.validate()?;

    for _ in 0..config.warmup_iterations {
        std::hint::black_box(run());
    }

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);
    let mut samples = Vec::with_capacity(config.repetitions);
    let mut result_sample = None;

    for _ in 0..config.repetitions {
        let _per_rep_pin =
            (config.pin_strategy == PinStrategy::PerRepetition).then(CpuPinGuard::new);
        let (sample, result) = run();
        samples.push(sample);
        result_sample = result;
    }

    Ok((samples, result_sample))
}

/// Mean wall-clock time of `work` over `config.repetitions` runs.
///
/// The value returned by `work` is passed through `black_box` and dropped.
pub fn time_mean<F, R>(config: &TimingConfig, mut work: F) -> Result<Duration>
where
    F: FnMut() -> R,
{
    let (samples, _) = collect_samples(config, || {
        let (sample, _) = crate::measure!(work());
        (sample, None)
    })?;
    let elapsed: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
    Ok(Duration::from_secs_f64(mean_micros(&elapsed) / 1e6))
}

/// Time one registered variant.
pub fn measure_variant(variant: &mut VariantClosure<'_>, config: &TimingConfig) -> Result<VariantTiming> {
    let (raw, result_sample) = collect_samples(config, &mut variant.run)?;
    let samples: Vec<Duration> = raw.iter().map(|s| s.elapsed).collect();
    // a partial set of counts would skew the mean
    let cycles: Vec<u64> = raw.iter().map(|s| s.cycles).collect::<Option<_>>().unwrap_or_default();
    let mean = mean_micros(&samples);
    debug!(
        "{}: {} repetitions, mean {:.3} µs",
        variant.name,
        samples.len(),
        mean
    );

    Ok(VariantTiming {
        name: variant.name,
        description: variant.description,
        samples,
        cycles,
        mean_micros: mean,
        result_sample,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    fn scripted(durations: Vec<u64>) -> VariantClosure<'static> {
        let mut it = durations.into_iter().cycle();
        let mut call = 0.0;
        VariantClosure {
            name: "scripted",
            description: "Returns canned durations",
            run: Box::new(move || {
                call += 1.0;
                (Sample::wall(Duration::from_micros(it.next().unwrap())), Some(call))
            }),
        }
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let config = TimingConfig::with_repetitions(0);
        let err = time_mean(&config, || 1).unwrap_err();
        assert!(matches!(err, BenchError::ZeroRepetitions));
    }

    #[test]
    fn test_runs_exactly_r_times() {
        let mut calls = 0;
        let config = TimingConfig {
            repetitions: 7,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::Off,
        };
        time_mean(&config, || calls += 1).unwrap();
        assert_eq!(calls, 9);
    }

    #[test]
    fn test_mean_of_scripted_samples() {
        let mut variant = scripted(vec![10, 20, 30]);
        let config = TimingConfig {
            repetitions: 3,
            warmup_iterations: 0,
            pin_strategy: PinStrategy::Off,
        };
        let timing = measure_variant(&mut variant, &config).unwrap();
        assert_eq!(timing.samples.len(), 3);
        assert!((timing.mean_micros - 20.0).abs() < 1e-9);
        assert!((timing.min_micros() - 10.0).abs() < 1e-9);
        assert!((timing.max_micros() - 30.0).abs() < 1e-9);
        // sample comes from the last repetition
        assert_eq!(timing.result_sample, Some(3.0));
    }

    #[test]
    fn test_cycle_counts_are_averaged() {
        let mut counts = vec![Some(100), Some(300)].into_iter().cycle();
        let mut variant = VariantClosure {
            name: "counted",
            description: "Reports canned cycle counts",
            run: Box::new(move || {
                let sample = Sample {
                    elapsed: Duration::from_micros(1),
                    cycles: counts.next().unwrap(),
                };
                (sample, None)
            }),
        };
        let config = TimingConfig {
            repetitions: 2,
            warmup_iterations: 0,
            pin_strategy: PinStrategy::Off,
        };
        let timing = measure_variant(&mut variant, &config).unwrap();
        assert_eq!(timing.cycles, vec![100, 300]);
        assert_eq!(timing.mean_cycles(), Some(200.0));

        // wall-only samples leave the cycle column empty
        let timing = measure_variant(&mut scripted(vec![10]), &config).unwrap();
        assert!(timing.cycles.is_empty());
        assert_eq!(timing.mean_cycles(), None);
    }

    #[test]
    fn test_per_repetition_pinning() {
        let mut variant = scripted(vec![5]);
        let config = TimingConfig {
            repetitions: 4,
            warmup_iterations: 1,
            pin_strategy: PinStrategy::PerRepetition,
        };
        let timing = measure_variant(&mut variant, &config).unwrap();
        assert_eq!(timing.samples.len(), 4);
        assert_eq!(timing.result_sample, Some(5.0));
    }

    #[test]
    fn test_repeated_harness_runs_are_comparable() {
        let data: Vec<f64> = (0..200_000).map(|i| (i % 17) as f64).collect();
        let config = TimingConfig {
            repetitions: 20,
            warmup_iterations: 3,
            pin_strategy: PinStrategy::Global,
        };
        let work = || black_box(&data).iter().sum::<f64>();

        let first = time_mean(&config, work).unwrap().as_secs_f64();
        let second = time_mean(&config, work).unwrap().as_secs_f64();
        assert!(first > 0.0 && second > 0.0);

        let ratio = first / second;
        assert!(
            (0.1..10.0).contains(&ratio),
            "harness means diverge too much: {first} vs {second}"
        );
    }
}
