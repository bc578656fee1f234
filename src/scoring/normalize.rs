/// Lowest score given to an applicable value.
pub const SCORE_MIN: f64 = 1.0;
/// Highest score given to an applicable value.
pub const SCORE_MAX: f64 = 5.0;
/// Score used when applicable values cannot be told apart.
pub const NEUTRAL_SCORE: f64 = 3.0;
/// Score for values marked not applicable (input of exactly 0).
pub const NOT_APPLICABLE_SCORE: f64 = 0.0;

/// Rescale a reliability proxy (e.g. MTBF hours) onto a 1-5 scale.
///
/// Zero means "not applicable": such positions are left out of the min/max
/// and always score 0. The remaining values map linearly, min -> 1 and
/// max -> 5. When fewer than two distinct applicable values exist, every
/// applicable position gets the neutral score 3.
///
/// Inputs are expected to be finite and non-negative.
pub fn normalize_to_scale(values: &[f64]) -> Vec<f64> {
    let applicable = values.iter().copied().filter(|v| *v != 0.0);
    let (min, max) = applicable.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    // min stays +inf when nothing is applicable
    let degenerate = !min.is_finite() || max == min;

    values
        .iter()
        .map(|&v| {
            if v == 0.0 {
                NOT_APPLICABLE_SCORE
            } else if degenerate {
                NEUTRAL_SCORE
            } else {
                SCORE_MIN + (SCORE_MAX - SCORE_MIN) * (v - min) / (max - min)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_default_mtbf_column() {
        // SSD sits 3/8 of the way between HDD and Tape: 1 + 4 * 0.375
        let scores = normalize_to_scale(&[1_200_000.0, 1_500_000.0, 2_000_000.0, 0.0]);
        assert_close(&scores, &[1.0, 2.5, 5.0, 0.0]);
    }

    #[test]
    fn test_two_values() {
        assert_close(&normalize_to_scale(&[10.0, 20.0]), &[1.0, 5.0]);
    }

    #[test]
    fn test_midpoint_is_three() {
        assert_close(&normalize_to_scale(&[10.0, 15.0, 20.0]), &[1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_all_equal_nonzero_is_neutral() {
        assert_close(&normalize_to_scale(&[7.0, 7.0, 7.0]), &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_all_equal_with_zero_keeps_zero() {
        assert_close(&normalize_to_scale(&[7.0, 0.0, 7.0]), &[3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_single_applicable_value_is_neutral() {
        assert_close(&normalize_to_scale(&[0.0, 42.0]), &[0.0, 3.0]);
    }

    #[test]
    fn test_all_zero() {
        assert_close(&normalize_to_scale(&[0.0, 0.0]), &[0.0, 0.0]);
    }

    #[test]
    fn test_empty() {
        assert!(normalize_to_scale(&[]).is_empty());
    }

    #[test]
    fn test_no_zeros_uses_full_range() {
        assert_close(&normalize_to_scale(&[4.0, 2.0, 3.0]), &[5.0, 1.0, 3.0]);
    }

    proptest! {
        #[test]
        fn prop_scores_in_range(values in prop::collection::vec(
            prop_oneof![Just(0.0), 1.0f64..1e7], 0..12
        )) {
            let scores = normalize_to_scale(&values);
            prop_assert_eq!(scores.len(), values.len());
            for (v, s) in values.iter().zip(&scores) {
                if *v == 0.0 {
                    prop_assert_eq!(*s, 0.0);
                } else {
                    prop_assert!(*s >= SCORE_MIN - 1e-9 && *s <= SCORE_MAX + 1e-9);
                }
            }
        }

        #[test]
        fn prop_order_preserving(values in prop::collection::vec(1.0f64..1e7, 2..12)) {
            let scores = normalize_to_scale(&values);
            for i in 0..values.len() {
                for j in 0..values.len() {
                    if values[i] < values[j] {
                        prop_assert!(scores[i] <= scores[j]);
                    }
                }
            }
        }

        #[test]
        fn prop_extremes_hit_bounds(values in prop::collection::vec(1.0f64..1e7, 2..12)) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(max > min);
            let scores = normalize_to_scale(&values);
            for (v, s) in values.iter().zip(&scores) {
                if *v == min {
                    prop_assert!((*s - SCORE_MIN).abs() < 1e-9);
                }
                if *v == max {
                    prop_assert!((*s - SCORE_MAX).abs() < 1e-9);
                }
            }
        }
    }
}
