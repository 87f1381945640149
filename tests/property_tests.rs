//! Property-based tests for the series builder and the grid search.
//!
//! These verify invariants that must hold for all valid inputs, using
//! randomly generated observation years and count series.

use marque_forecast::core::AnnualSeries;
use marque_forecast::models::{grid_search, train_validation_split, CandidateOutcome};
use proptest::prelude::*;

/// Strategy for non-empty observation year lists in a plausible range.
fn years_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1990..2030i32, 1..60)
}

/// Strategy for small non-negative count series.
fn counts_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u32..50u32, 2..20)
        .prop_map(|counts| counts.into_iter().map(f64::from).collect())
}

proptest! {
    #[test]
    fn series_spans_observed_extremes_contiguously(years in years_strategy()) {
        let series = AnnualSeries::from_years(&years).unwrap();
        let min = *years.iter().min().unwrap();
        let max = *years.iter().max().unwrap();

        prop_assert_eq!(series.start_year(), min);
        prop_assert_eq!(series.end_year(), max);
        prop_assert_eq!(series.len(), (max - min + 1) as usize);

        let series_years: Vec<i32> = series.iter().map(|(y, _)| y).collect();
        for w in series_years.windows(2) {
            prop_assert_eq!(w[1], w[0] + 1);
        }
    }

    #[test]
    fn series_counts_sum_to_observation_count(years in years_strategy()) {
        let series = AnnualSeries::from_years(&years).unwrap();
        let total: u64 = series.counts().iter().sum();
        prop_assert_eq!(total, years.len() as u64);
    }

    #[test]
    fn split_lengths_add_up(values in counts_strategy()) {
        let n = values.len();
        let (train, validation) = train_validation_split(&values).unwrap();
        prop_assert_eq!(train.len(), (n as f64 * 0.8) as usize);
        prop_assert_eq!(train.len() + validation.len(), n);
        prop_assert!(!train.is_empty());
        prop_assert!(!validation.is_empty());
    }

}

proptest! {
    // The grid runs 192 fits per case; keep the case count modest.
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn best_candidate_is_argmin(values in counts_strategy()) {
        let outcome = grid_search(&values).unwrap();
        if let Some(best) = outcome.best {
            for eval in &outcome.evals {
                if let CandidateOutcome::Fitted { mse } = eval.outcome {
                    prop_assert!(best.mse <= mse);
                }
            }
            prop_assert!(best.mse.is_finite());
        }
    }

    #[test]
    fn every_candidate_gets_a_typed_outcome(values in counts_strategy()) {
        let outcome = grid_search(&values).unwrap();
        prop_assert_eq!(outcome.evals.len(), 192);
        prop_assert_eq!(
            outcome.fitted_count() + outcome.skipped_count(),
            outcome.evals.len()
        );
    }
}
