//! End-to-end batch run: normalize, select cohorts, search, forecast,
//! aggregate.

use tracing::{debug, info, warn};

use crate::cohort::{select_cohorts, Cohort};
use crate::core::{AnnualSeries, Observation};
use crate::error::{ForecastError, Result};
use crate::models::{grid_search, SARIMA};
use crate::output::ForecastRecord;
use crate::source::ObservationSource;

/// Default number of states to model.
pub const DEFAULT_TOP_STATES: usize = 10;
/// Default number of brands per state to model.
pub const DEFAULT_TOP_BRANDS: usize = 3;

/// Batch forecasting pipeline over the top states and brands.
///
/// Every failure is contained at the cohort level: a cohort that cannot be
/// modeled contributes no rows and the run continues.
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    top_states: usize,
    top_brands: usize,
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastPipeline {
    /// Pipeline with the default cohort limits (10 states, 3 brands each).
    pub fn new() -> Self {
        Self {
            top_states: DEFAULT_TOP_STATES,
            top_brands: DEFAULT_TOP_BRANDS,
        }
    }

    /// Pipeline with custom cohort limits.
    pub fn with_limits(top_states: usize, top_brands: usize) -> Self {
        Self {
            top_states,
            top_brands,
        }
    }

    /// Run the full pipeline against a source, returning the flat output
    /// table: historical rows then one forecast row per viable cohort.
    pub fn run(&self, source: &dyn ObservationSource) -> Result<Vec<ForecastRecord>> {
        let observations = source.observations()?;
        let cohorts = select_cohorts(&observations, self.top_states, self.top_brands);
        info!(
            observations = observations.len(),
            cohorts = cohorts.len(),
            "selected cohorts"
        );

        // Per-cohort result vectors merged at the end; no shared accumulator.
        let mut records = Vec::new();
        for cohort in &cohorts {
            info!(state = %cohort.state, brand = %cohort.brand, "modeling cohort");
            match self.run_cohort(cohort, &observations) {
                Ok(cohort_records) => records.extend(cohort_records),
                Err(err) => {
                    warn!(state = %cohort.state, brand = %cohort.brand, %err, "cohort skipped")
                }
            }
        }
        Ok(records)
    }

    /// Model one cohort: series, grid search, refit, one-step forecast.
    fn run_cohort(
        &self,
        cohort: &Cohort,
        observations: &[Observation],
    ) -> Result<Vec<ForecastRecord>> {
        let years: Vec<i32> = observations
            .iter()
            .filter(|o| o.state == cohort.state && o.brand == cohort.brand)
            .map(|o| o.year)
            .collect();
        let series = AnnualSeries::from_years(&years)?;
        let values = series.values();

        let outcome = grid_search(&values)?;
        let best = outcome.best.ok_or_else(|| ForecastError::NoViableModel {
            state: cohort.state.clone(),
            brand: cohort.brand.clone(),
        })?;
        debug!(
            spec = %best.spec,
            mse = best.mse,
            fitted = outcome.fitted_count(),
            skipped = outcome.skipped_count(),
            "selected candidate"
        );

        // Refit the winner on the full series for the one-step forecast.
        let mut model = SARIMA::new(best.spec);
        model.fit(&values)?;
        let forecast = model.forecast(1)?;
        let predicted = *forecast
            .first()
            .ok_or_else(|| ForecastError::ComputationError("empty forecast".to_string()))?;
        info!(state = %cohort.state, brand = %cohort.brand, year = series.end_year() + 1, predicted, "forecast");

        let mut records: Vec<ForecastRecord> = series
            .iter()
            .map(|(year, count)| ForecastRecord::historical(cohort, year, count))
            .collect();
        records.push(ForecastRecord::forecast(
            cohort,
            series.end_year() + 1,
            predicted,
        ));
        Ok(records)
    }
}
