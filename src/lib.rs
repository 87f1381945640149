//! # marque-forecast
//!
//! Seasonal ARIMA forecasting of vehicle brand purchase counts by U.S. state.
//!
//! The pipeline normalizes a wide survey table into purchase observations,
//! selects the top states and brands by volume, builds a gap-free annual
//! count series per (state, brand) cohort, brute-force grid-searches SARIMA
//! hyperparameters against a train/validation split, and emits a one-step
//! forecast per cohort alongside the historical counts.

#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

pub mod cohort;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::cohort::{select_cohorts, Cohort};
    pub use crate::core::{normalize, AnnualSeries, Observation, WideRecord};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{grid_search, SARIMASpec, SARIMA};
    pub use crate::output::{write_records, ForecastRecord};
    pub use crate::pipeline::ForecastPipeline;
    pub use crate::source::{CsvSource, InMemorySource, ObservationSource};
}
