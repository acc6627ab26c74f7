//! Numerical equivalence of competing variants.
//!
//! Every variant of a family is evaluated once per input size and compared
//! against the baseline's output. Scalars are treated as one-element vectors
//! so the summation and matrix families share one checker.

use std::fmt;

/// Acceptance bound for `|candidate - reference|`, element-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tolerance {
    /// Fixed bound regardless of magnitude.
    Absolute(f64),
    /// Bound scaled by the largest reference magnitude (floored at 1.0, so
    /// near-zero outputs fall back to an absolute check).
    Relative(f64),
}

impl Tolerance {
    /// Summation family: sums of values in `[-100, 100)` up to ~1e8 elements.
    pub const SUMMATION: Tolerance = Tolerance::Absolute(1e-2);

    /// Dot-product family. Each output element accumulates N products, so
    /// the bound grows with the result.
    pub const DOT_PRODUCT: Tolerance = Tolerance::Relative(1e-9);

    /// Concrete bound for a given reference output.
    pub fn bound(&self, reference: &[f64]) -> f64 {
        match *self {
            Tolerance::Absolute(eps) => eps,
            Tolerance::Relative(eps) => {
                let scale = reference.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
                eps * scale
            }
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Absolute(eps) => write!(f, "absolute {:e}", eps),
            Tolerance::Relative(eps) => write!(f, "relative {:e}", eps),
        }
    }
}

/// One variant's output for the shared input.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantOutput {
    pub name: &'static str,
    pub values: Vec<f64>,
}

impl VariantOutput {
    pub fn scalar(name: &'static str, value: f64) -> Self {
        Self {
            name,
            values: vec![value],
        }
    }

    pub fn vector(name: &'static str, values: Vec<f64>) -> Self {
        Self { name, values }
    }
}

/// How far one candidate sits from the reference.
#[derive(Clone, Debug)]
pub struct Deviation {
    pub output: VariantOutput,
    /// Largest element-wise absolute difference. Infinite when the shapes
    /// differ or a NaN shows up.
    pub max_abs_diff: f64,
    /// Index of the worst element, if any.
    pub worst_index: Option<usize>,
    pub within_tolerance: bool,
}

/// Result of comparing every candidate against the reference.
#[derive(Clone, Debug)]
pub struct EquivalenceReport {
    pub reference: VariantOutput,
    pub tolerance: Tolerance,
    pub bound: f64,
    pub deviations: Vec<Deviation>,
}

impl EquivalenceReport {
    pub fn passed(&self) -> bool {
        self.deviations.iter().all(|d| d.within_tolerance)
    }

    /// Candidates that fell outside the bound.
    pub fn divergent(&self) -> impl Iterator<Item = &Deviation> {
        self.deviations.iter().filter(|d| !d.within_tolerance)
    }
}

/// Compare `candidates` against `reference`.
pub fn check(
    reference: VariantOutput,
    candidates: Vec<VariantOutput>,
    tolerance: Tolerance,
) -> EquivalenceReport {
    let bound = tolerance.bound(&reference.values);
    let deviations = candidates
        .into_iter()
        .map(|output| {
            let (max_abs_diff, worst_index) = max_deviation(&reference.values, &output.values);
            Deviation {
                within_tolerance: max_abs_diff < bound,
                max_abs_diff,
                worst_index,
                output,
            }
        })
        .collect();

    EquivalenceReport {
        reference,
        tolerance,
        bound,
        deviations,
    }
}

fn max_deviation(reference: &[f64], candidate: &[f64]) -> (f64, Option<usize>) {
    if reference.len() != candidate.len() {
        return (f64::INFINITY, None);
    }

    let mut worst = 0.0_f64;
    let mut worst_index = None;
    for (i, (r, c)) in reference.iter().zip(candidate).enumerate() {
        let diff = (c - r).abs();
        let diff = if diff.is_nan() { f64::INFINITY } else { diff };
        if worst_index.is_none() || diff > worst {
            worst = diff;
            worst_index = Some(i);
        }
    }
    (worst, worst_index)
}

fn describe(values: &[f64], at: Option<usize>) -> String {
    match (values, at) {
        ([single], _) => format!("{:.6}", single),
        ([], _) => "[]".to_string(),
        (_, Some(i)) if i < values.len() => {
            format!("[len {}, [{}] = {:.6}]", values.len(), i, values[i])
        }
        _ => format!("[len {}]", values.len()),
    }
}

impl fmt::Display for EquivalenceReport {
    /// Lists the reference and every candidate, flagging the divergent ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let worst_overall = self
            .deviations
            .iter()
            .filter(|d| !d.within_tolerance)
            .find_map(|d| d.worst_index);

        writeln!(
            f,
            "tolerance: {} (bound {:e})",
            self.tolerance, self.bound
        )?;
        writeln!(
            f,
            "  {:<28} {}  (reference)",
            self.reference.name,
            describe(&self.reference.values, worst_overall)
        )?;
        for d in &self.deviations {
            let mark = if d.within_tolerance { "ok" } else { "DIVERGES" };
            writeln!(
                f,
                "  {:<28} {}  |Δ| = {:e}  {}",
                d.output.name,
                describe(&d.output.values, worst_overall.or(d.worst_index)),
                d.max_abs_diff,
                mark
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_within_absolute_bound() {
        let report = check(
            VariantOutput::scalar("naive_sum", 10.0),
            vec![
                VariantOutput::scalar("two_way_sum", 10.001),
                VariantOutput::scalar("unrolled_sum_4", 9.999),
            ],
            Tolerance::SUMMATION,
        );
        assert!(report.passed());
        assert_eq!(report.divergent().count(), 0);
    }

    #[test]
    fn test_divergence_is_reported_with_every_value() {
        let report = check(
            VariantOutput::scalar("naive_sum", 10.0),
            vec![
                VariantOutput::scalar("two_way_sum", 10.0),
                VariantOutput::scalar("broken", 12.5),
            ],
            Tolerance::SUMMATION,
        );
        assert!(!report.passed());
        let divergent: Vec<_> = report.divergent().map(|d| d.output.name).collect();
        assert_eq!(divergent, vec!["broken"]);

        let text = report.to_string();
        assert!(text.contains("naive_sum"));
        assert!(text.contains("two_way_sum"));
        assert!(text.contains("broken"));
        assert!(text.contains("12.500000"));
        assert!(text.contains("DIVERGES"));
    }

    #[test]
    fn test_bound_is_strict() {
        let report = check(
            VariantOutput::scalar("a", 0.0),
            vec![VariantOutput::scalar("b", 0.5)],
            Tolerance::Absolute(0.5),
        );
        assert!(!report.passed());
    }

    #[test]
    fn test_nan_never_passes() {
        let report = check(
            VariantOutput::scalar("a", 1.0),
            vec![VariantOutput::scalar("b", f64::NAN)],
            Tolerance::Absolute(1e6),
        );
        assert!(!report.passed());
        assert_eq!(report.deviations[0].max_abs_diff, f64::INFINITY);
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let report = check(
            VariantOutput::vector("a", vec![1.0, 2.0]),
            vec![VariantOutput::vector("b", vec![1.0])],
            Tolerance::DOT_PRODUCT,
        );
        assert!(!report.passed());
    }

    #[test]
    fn test_relative_bound_scales_with_magnitude() {
        let reference = vec![1e6, -3e6, 2.0];
        assert!((Tolerance::Relative(1e-9).bound(&reference) - 3e-3).abs() < 1e-12);
        // floored at 1.0 for tiny outputs
        assert_eq!(Tolerance::Relative(1e-9).bound(&[1e-3]), 1e-9);

        let report = check(
            VariantOutput::vector("naive", reference.clone()),
            vec![VariantOutput::vector("friendly", vec![1e6 + 1e-3, -3e6, 2.0])],
            Tolerance::Relative(1e-9),
        );
        assert!(report.passed());
        assert_eq!(report.deviations[0].worst_index, Some(0));
    }

    #[test]
    fn test_empty_vectors_agree() {
        let report = check(
            VariantOutput::vector("a", vec![]),
            vec![VariantOutput::vector("b", vec![])],
            Tolerance::DOT_PRODUCT,
        );
        assert!(report.passed());
    }
}
