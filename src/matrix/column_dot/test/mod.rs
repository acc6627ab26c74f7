//! Verification of column dot-product implementations.

use super::code::available_variants;
use super::{check_equivalence, VALUE_RANGE};
use crate::matrix::SquareMatrix;
use crate::utils::{seeded_rng, uniform_vec};

/// Verify all variants agree with the baseline on seeded random inputs,
/// including the degenerate 0×0 and 1×1 cases.
pub fn verify_all() -> Result<(), String> {
    let variants = available_variants();
    let mut rng = seeded_rng(0xd07);
    let (low, high) = VALUE_RANGE;

    for dim in [0usize, 1, 2, 3, 17, 64, 129] {
        let a = SquareMatrix::random(dim, &mut rng, low, high).map_err(|e| e.to_string())?;
        let v = uniform_vec(&mut rng, dim, low, high).map_err(|e| e.to_string())?;
        let report = check_equivalence(&variants, &a, &v);
        if !report.passed() {
            return Err(format!("dim {}:\n{}", dim, report));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::column_dot::code::*;

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should agree with naive_column_dot");
    }

    #[test]
    fn test_two_by_two() {
        let a = SquareMatrix::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let v = [1.0, 1.0];
        for variant in available_variants() {
            assert_eq!(evaluate(variant.function, &a, &v), vec![4.0, 6.0], "{}", variant.name);
        }
    }

    #[test]
    fn test_result_is_zeroed_first() {
        let a = SquareMatrix::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let v = [2.0, 0.5];
        for variant in available_variants() {
            let mut result = vec![f64::NAN, 1e9];
            (variant.function)(&a, &v, &mut result);
            assert_eq!(result, vec![3.5, 6.0], "{}", variant.name);
        }
    }

    #[test]
    fn test_identity_returns_vector() {
        let n = 5;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        let a = SquareMatrix::from_row_major(n, data).unwrap();
        let v: Vec<f64> = (0..n).map(|i| i as f64 * 1.5).collect();
        for variant in available_variants() {
            assert_eq!(evaluate(variant.function, &a, &v), v, "{}", variant.name);
        }
    }

    #[test]
    fn test_loop_order_equivalence_on_random_input() {
        let mut rng = seeded_rng(99);
        let n = 300;
        let a = SquareMatrix::random(n, &mut rng, 0.0, 1.0).unwrap();
        let v = uniform_vec(&mut rng, n, 0.0, 1.0).unwrap();

        let naive = evaluate(naive_column_dot, &a, &v);
        let friendly = evaluate(cache_friendly_column_dot, &a, &v);

        let scale = naive.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
        for (j, (x, y)) in naive.iter().zip(&friendly).enumerate() {
            assert!((x - y).abs() <= 1e-12 * scale, "element {j}: {x} vs {y}");
        }

        // column sums of Aᵀ·v against a direct evaluation
        for j in [0, n / 2, n - 1] {
            let direct: f64 = (0..n).map(|i| a.get(i, j) * v[i]).sum();
            assert!((naive[j] - direct).abs() <= 1e-9 * scale);
        }
    }

    #[test]
    fn test_runner_sizing() {
        use crate::error::BenchError;
        use crate::matrix::column_dot::{ColumnDotRunner, DEFAULT_SIZES};
        use crate::registry::AlgorithmRunner;
        use crate::utils::ExperimentConfig;

        for key in [400, 2_000, 5_000] {
            assert!(DEFAULT_SIZES.contains(&key), "sweep misses {key}");
        }
        assert_eq!(ColumnDotRunner.elements(300), 90_000);

        let huge = 1usize << (usize::BITS / 2);
        let config = ExperimentConfig {
            sizes: vec![64, huge],
            ..ExperimentConfig::sweep(&ColumnDotRunner)
        };
        let err = config.validate(&ColumnDotRunner).unwrap_err();
        assert!(matches!(err, BenchError::MatrixTooLarge { dim } if dim == huge));
    }

    #[test]
    #[should_panic(expected = "Vector length must match matrix dimension")]
    fn test_length_mismatch_panics() {
        let a = SquareMatrix::zeros(3).unwrap();
        let mut result = vec![0.0; 3];
        naive_column_dot(&a, &[1.0, 2.0], &mut result);
    }
}
