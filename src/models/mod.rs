//! Seasonal ARIMA model family and hyperparameter search.

mod diff;
mod grid;
mod sarima;

pub use diff::{difference, integrate, seasonal_difference, seasonal_integrate};
pub use grid::{
    candidate_grid, grid_search, train_validation_split, BestCandidate, CandidateEval,
    CandidateOutcome, SearchOutcome, SEASONAL_PERIODS,
};
pub use sarima::{SARIMASpec, SARIMA};
