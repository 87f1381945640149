//! Flat output table: one row per historical year plus one forecast row per
//! cohort.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cohort::Cohort;
use crate::error::{ForecastError, Result};

/// One row of the output table.
///
/// Exactly one of `purchases` and `predicted` is populated: historical rows
/// carry the observed count, the single synthetic future row carries the
/// point forecast. Rows are written once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "BRAND")]
    pub brand: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "PURCHASES")]
    pub purchases: Option<u64>,
    #[serde(rename = "PREDICTED")]
    pub predicted: Option<f64>,
}

impl ForecastRecord {
    /// A historical row: observed purchases, no prediction.
    pub fn historical(cohort: &Cohort, year: i32, purchases: u64) -> Self {
        Self {
            state: cohort.state.clone(),
            brand: cohort.brand.clone(),
            year,
            purchases: Some(purchases),
            predicted: None,
        }
    }

    /// The synthetic forecast row: prediction only.
    pub fn forecast(cohort: &Cohort, year: i32, predicted: f64) -> Self {
        Self {
            state: cohort.state.clone(),
            brand: cohort.brand.clone(),
            year,
            purchases: None,
            predicted: Some(predicted),
        }
    }
}

/// Write records as CSV with STATE, BRAND, YEAR, PURCHASES, PREDICTED
/// columns; absent values serialize as empty fields.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ForecastRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| ForecastError::Io(e.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| ForecastError::Io(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ForecastError::Io(e.to_string()))?;
    Ok(())
}
