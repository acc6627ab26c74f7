//! Verification of summation implementations.

use super::code::available_variants;
use super::{check_equivalence, VALUE_RANGE};
use crate::utils::{seeded_rng, uniform_vec};

/// Sizes covering the empty, tiny, odd and unaligned cases.
const VERIFY_SIZES: &[usize] = &[0, 1, 2, 3, 5, 7, 16, 17, 1000, 1023, 8193];

/// Verify all variants agree with the baseline on seeded random inputs.
pub fn verify_all() -> Result<(), String> {
    let variants = available_variants();
    let mut rng = seeded_rng(0x5eed);
    let (low, high) = VALUE_RANGE;

    for &size in VERIFY_SIZES {
        let data = uniform_vec(&mut rng, size, low, high).map_err(|e| e.to_string())?;
        let report = check_equivalence(&variants, &data);
        if !report.passed() {
            return Err(format!("size {}:\n{}", size, report));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::sum::code::*;
    use proptest::prelude::*;

    fn all_results(data: &[f64]) -> Vec<(&'static str, f64)> {
        available_variants()
            .iter()
            .map(|v| (v.name, v.function.evaluate(data)))
            .collect()
    }

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should agree with naive_sum");
    }

    #[test]
    fn test_eight_ones() {
        let data = [1.0; 8];
        for (name, result) in all_results(&data) {
            assert_eq!(result, 8.0, "{name}");
        }
    }

    #[test]
    fn test_five_twos() {
        let data = [2.0; 5];
        for (name, result) in all_results(&data) {
            assert_eq!(result, 10.0, "{name}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(naive_sum(&[]), 0.0);
        assert_eq!(recursive_pairwise_sum(&[]), 0.0);
        assert_eq!(in_place_pairwise_sum(&mut []), 0.0);
        for (name, result) in all_results(&[]) {
            assert_eq!(result, 0.0, "{name}");
        }
    }

    #[test]
    fn test_single_element_is_bit_identical() {
        for value in [3.25, -17.125, 1e-300, 99.99999] {
            for (name, result) in all_results(&[value]) {
                assert_eq!(result.to_bits(), value.to_bits(), "{name} on {value}");
            }
        }
    }

    #[test]
    fn test_odd_length_keeps_last_element() {
        for n in [1usize, 3, 5, 7, 9, 33, 1001, 4097] {
            let ones = vec![1.0; n];
            assert_eq!(two_way_sum(&ones), n as f64, "two_way n={n}");
            let mut scratch = ones.clone();
            assert_eq!(in_place_pairwise_sum(&mut scratch), n as f64, "in_place n={n}");
            assert_eq!(recursive_pairwise_sum(&ones), n as f64, "recursive n={n}");
        }
    }

    #[test]
    fn test_remainders_for_every_unroll_factor() {
        for n in 0..40 {
            let data: Vec<f64> = (1..=n).map(|i| i as f64).collect();
            let expected = (n * (n + 1) / 2) as f64;
            assert_eq!(unrolled_sum_4(&data), expected, "unrolled_4 n={n}");
            assert_eq!(unrolled_sum_8(&data), expected, "unrolled_8 n={n}");
        }
    }

    #[test]
    fn test_blocked_handles_partial_final_block() {
        let data: Vec<f64> = (0..1000).map(|i| (i % 10) as f64).collect();
        let expected = naive_sum(&data);
        for block in [1, 7, 8, 64, 333, 999, 1000, 5000] {
            assert_eq!(blocked_unrolled_sum_with(&data, block), expected, "block {block}");
        }
        let default = vec![0.5; DEFAULT_BLOCK_SIZE * 2 + 3];
        assert_eq!(blocked_unrolled_sum(&default), default.len() as f64 * 0.5);
    }

    #[test]
    #[should_panic(expected = "block size must be positive")]
    fn test_blocked_rejects_zero_block() {
        blocked_unrolled_sum_with(&[1.0; 32], 0);
    }

    #[test]
    fn test_in_place_overwrites_its_buffer() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(in_place_pairwise_sum(&mut data), 15.0);
        assert_eq!(data[0], 15.0);
    }

    #[test]
    fn test_in_place_kernel_evaluation_preserves_input() {
        let data = vec![1.0, 2.0, 3.0];
        let kernel = SumKernel::InPlace(in_place_pairwise_sum);
        assert_eq!(kernel.evaluate(&data), 6.0);
        assert_eq!(kernel.evaluate(&data), 6.0);
        assert_eq!(data, vec![1.0, 2.0, 3.0]);
    }

    /// Walks the same splits as `recursive_pairwise_sum`, counting frames.
    fn traced_depth(len: usize) -> u32 {
        if len <= 2 {
            1
        } else {
            let left = split_point(len);
            1 + traced_depth(left).max(traced_depth(len - left))
        }
    }

    #[test]
    fn test_recursion_depth_is_logarithmic() {
        for len in 0..5000 {
            assert_eq!(traced_depth(len), max_recursion_depth(len), "len {len}");
        }
        assert_eq!(max_recursion_depth(1 << 26), 26);
        assert_eq!(max_recursion_depth((1 << 26) + 1), 27);
    }

    #[test]
    fn test_equivalence_on_reference_sizes() {
        let variants = available_variants();
        let mut rng = seeded_rng(2024);
        for size in [0usize, 1, 2, 3, 1000, 1_000_000] {
            let data = uniform_vec(&mut rng, size, -100.0, 100.0).unwrap();
            let report = check_equivalence(&variants, &data);
            assert!(report.passed(), "size {size}:\n{report}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_variants_agree_with_naive(
            data in prop::collection::vec(-100.0f64..100.0, 0..3000)
        ) {
            let reference = naive_sum(&data);
            for (name, result) in all_results(&data) {
                prop_assert!(
                    (result - reference).abs() < 1e-2,
                    "{} gave {} vs {}", name, result, reference
                );
            }
        }

        #[test]
        fn prop_integer_inputs_sum_exactly(
            data in prop::collection::vec(-1000i32..1000, 0..500)
        ) {
            let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
            let expected: i64 = data.iter().map(|&v| v as i64).sum();
            for (name, result) in all_results(&values) {
                prop_assert_eq!(result, expected as f64, "{}", name);
            }
        }
    }
}
