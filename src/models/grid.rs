//! Brute-force hyperparameter grid search over SARIMA candidates.

use crate::error::{ForecastError, Result};
use crate::models::sarima::{SARIMASpec, SARIMA};
use crate::utils::metrics::mse;

/// Seasonal periods included in the search grid.
pub const SEASONAL_PERIODS: [usize; 3] = [3, 4, 12];

/// Fraction of the series used for training.
const TRAIN_FRACTION: f64 = 0.8;

/// Enumerate the fixed candidate grid: p, d, q, P, D, Q ∈ {0, 1} and
/// s ∈ {3, 4, 12}, 192 candidates in lexicographic order with s varying
/// fastest. First-seen tie-breaking during selection depends on this order.
pub fn candidate_grid() -> Vec<SARIMASpec> {
    let mut grid = Vec::with_capacity(192);
    for p in 0..=1 {
        for d in 0..=1 {
            for q in 0..=1 {
                for cap_p in 0..=1 {
                    for cap_d in 0..=1 {
                        for cap_q in 0..=1 {
                            for &s in &SEASONAL_PERIODS {
                                grid.push(SARIMASpec::new(p, d, q, cap_p, cap_d, cap_q, s));
                            }
                        }
                    }
                }
            }
        }
    }
    grid
}

/// Split a series into train and validation segments.
///
/// Train takes the first `floor(0.8 n)` points. Series shorter than two
/// points cannot produce a non-empty split on both sides and are rejected.
pub fn train_validation_split(values: &[f64]) -> Result<(&[f64], &[f64])> {
    let n = values.len();
    if n < 2 {
        return Err(ForecastError::InsufficientData { needed: 2, got: n });
    }
    let train_len = (n as f64 * TRAIN_FRACTION) as usize;
    Ok(values.split_at(train_len))
}

/// Outcome of evaluating one candidate: either a validation score or the
/// typed reason the fit was skipped. Failure causes stay observable instead
/// of being swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// The candidate fitted; selection compares this validation MSE.
    Fitted { mse: f64 },
    /// The candidate could not be fitted or scored.
    Skipped(ForecastError),
}

/// One grid candidate together with its evaluation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEval {
    pub spec: SARIMASpec,
    pub outcome: CandidateOutcome,
}

/// The winning candidate of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestCandidate {
    /// Position in the candidate grid (tie-break key).
    pub index: usize,
    pub spec: SARIMASpec,
    /// Validation mean squared error.
    pub mse: f64,
}

/// Full result of a grid search over one cohort series.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Per-candidate evaluations in grid order.
    pub evals: Vec<CandidateEval>,
    /// Argmin over fitted candidates; `None` when every candidate failed,
    /// which is distinct from a candidate that forecast zero.
    pub best: Option<BestCandidate>,
}

impl SearchOutcome {
    /// Number of candidates that fitted successfully.
    pub fn fitted_count(&self) -> usize {
        self.evals
            .iter()
            .filter(|e| matches!(e.outcome, CandidateOutcome::Fitted { .. }))
            .count()
    }

    /// Number of candidates skipped.
    pub fn skipped_count(&self) -> usize {
        self.evals.len() - self.fitted_count()
    }
}

fn evaluate_candidate(spec: SARIMASpec, train: &[f64], validation: &[f64]) -> CandidateOutcome {
    let mut model = SARIMA::new(spec);
    if let Err(err) = model.fit(train) {
        return CandidateOutcome::Skipped(err);
    }
    let predicted = match model.forecast(validation.len()) {
        Ok(predicted) => predicted,
        Err(err) => return CandidateOutcome::Skipped(err),
    };
    match mse(validation, &predicted) {
        Ok(score) if score.is_finite() => CandidateOutcome::Fitted { mse: score },
        Ok(_) => CandidateOutcome::Skipped(ForecastError::ComputationError(
            "non-finite validation error".to_string(),
        )),
        Err(err) => CandidateOutcome::Skipped(err),
    }
}

/// Grid-search the full candidate set against a train/validation split of
/// `values`, selecting the candidate with the lowest validation MSE.
///
/// Per-candidate failures are recorded and skipped; only a degenerate series
/// (fewer than two points) is an error.
pub fn grid_search(values: &[f64]) -> Result<SearchOutcome> {
    let (train, validation) = train_validation_split(values)?;

    let mut evals = Vec::with_capacity(192);
    let mut best: Option<BestCandidate> = None;

    for (index, spec) in candidate_grid().into_iter().enumerate() {
        let outcome = evaluate_candidate(spec, train, validation);
        if let CandidateOutcome::Fitted { mse } = outcome {
            // Strict improvement only, so the first-seen candidate wins ties.
            if best.map_or(true, |b| mse < b.mse) {
                best = Some(BestCandidate { index, spec, mse });
            }
        }
        evals.push(CandidateEval { spec, outcome });
    }

    Ok(SearchOutcome { evals, best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_has_192_candidates_with_s_fastest() {
        let grid = candidate_grid();
        assert_eq!(grid.len(), 192);
        assert_eq!(grid[0], SARIMASpec::new(0, 0, 0, 0, 0, 0, 3));
        assert_eq!(grid[1], SARIMASpec::new(0, 0, 0, 0, 0, 0, 4));
        assert_eq!(grid[2], SARIMASpec::new(0, 0, 0, 0, 0, 0, 12));
        assert_eq!(grid[3], SARIMASpec::new(0, 0, 0, 0, 0, 1, 3));
        assert_eq!(grid[191], SARIMASpec::new(1, 1, 1, 1, 1, 1, 12));
    }

    #[test]
    fn split_takes_floor_of_train_fraction() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let (train, validation) = train_validation_split(&values).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(validation.len(), 2);

        let values = vec![1.0, 2.0, 3.0];
        let (train, validation) = train_validation_split(&values).unwrap();
        assert_eq!(train.len(), 2);
        assert_eq!(validation.len(), 1);
    }

    #[test]
    fn split_minimal_series() {
        let values = vec![2.0, 1.0];
        let (train, validation) = train_validation_split(&values).unwrap();
        assert_eq!(train, &[2.0]);
        assert_eq!(validation, &[1.0]);
    }

    #[test]
    fn degenerate_series_is_rejected_before_search() {
        assert!(matches!(
            grid_search(&[5.0]),
            Err(ForecastError::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(matches!(
            grid_search(&[]),
            Err(ForecastError::InsufficientData { needed: 2, got: 0 })
        ));
    }

    #[test]
    fn minimal_series_finds_a_model() {
        // n = 2: train [2], validation [1]. Zero-order candidates fit on a
        // single point and forecast its mean.
        let outcome = grid_search(&[2.0, 1.0]).unwrap();
        let best = outcome.best.unwrap();
        assert_relative_eq!(best.mse, 1.0, epsilon = 1e-9);
        assert!(outcome.fitted_count() > 0);
        assert!(outcome.skipped_count() > 0);
    }

    #[test]
    fn best_is_argmin_over_fitted_candidates() {
        let values: Vec<f64> = (0..20).map(|i| 10.0 + (i % 4) as f64).collect();
        let outcome = grid_search(&values).unwrap();
        let best = outcome.best.unwrap();
        for eval in &outcome.evals {
            if let CandidateOutcome::Fitted { mse } = eval.outcome {
                assert!(best.mse <= mse);
            }
        }
    }

    #[test]
    fn ties_resolve_to_first_seen_candidate() {
        // Constant series: every candidate that fits has zero validation
        // error, so the winner must be the very first grid entry.
        let values = vec![5.0; 10];
        let outcome = grid_search(&values).unwrap();
        let best = outcome.best.unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.spec, SARIMASpec::new(0, 0, 0, 0, 0, 0, 3));
        assert_relative_eq!(best.mse, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn all_failures_yield_no_best() {
        // Non-finite values poison every candidate fit; the outcome is
        // explicit, not a zero sentinel.
        let values = vec![f64::NAN; 10];
        let outcome = grid_search(&values).unwrap();
        assert!(outcome.best.is_none());
        assert_eq!(outcome.fitted_count(), 0);
        assert_eq!(outcome.evals.len(), 192);
        for eval in &outcome.evals {
            assert!(matches!(eval.outcome, CandidateOutcome::Skipped(_)));
        }
    }

    #[test]
    fn skip_reasons_are_observable() {
        let outcome = grid_search(&[2.0, 1.0]).unwrap();
        let skipped = outcome
            .evals
            .iter()
            .find(|e| matches!(e.outcome, CandidateOutcome::Skipped(_)))
            .unwrap();
        match &skipped.outcome {
            CandidateOutcome::Skipped(ForecastError::InsufficientData { got, .. }) => {
                assert_eq!(*got, 1);
            }
            other => panic!("expected insufficient-data skip, got {other:?}"),
        }
    }
}
