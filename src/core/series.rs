//! Annual count series for a single (state, brand) cohort.

use crate::error::{ForecastError, Result};

/// A gap-free yearly count series.
///
/// Covers the explicit span `[start_year, end_year]` of the observed years;
/// years with no observations inside the span hold a count of zero. The year
/// index is strictly increasing with unit step by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualSeries {
    start_year: i32,
    counts: Vec<u64>,
}

impl AnnualSeries {
    /// Build a series from the raw observation years of one cohort.
    ///
    /// Groups by year and reindexes onto `min_year..=max_year`. The span is
    /// taken from the observed extremes, so a cohort with interior gaps
    /// keeps its full range rather than being truncated.
    pub fn from_years(years: &[i32]) -> Result<Self> {
        let min_year = *years.iter().min().ok_or(ForecastError::EmptyData)?;
        let max_year = *years.iter().max().ok_or(ForecastError::EmptyData)?;

        let span = (max_year - min_year) as usize + 1;
        let mut counts = vec![0u64; span];
        for &year in years {
            counts[(year - min_year) as usize] += 1;
        }

        Ok(Self {
            start_year: min_year,
            counts,
        })
    }

    /// Build a series directly from a starting year and counts.
    pub fn from_counts(start_year: i32, counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        Ok(Self { start_year, counts })
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when the series covers no years.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// First year of the span.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last year of the span.
    pub fn end_year(&self) -> i32 {
        self.start_year + self.counts.len() as i32 - 1
    }

    /// Counts in year order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Counts as floats, for model fitting.
    pub fn values(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }

    /// Iterate over (year, count) pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.start_year + i as i32, c))
    }
}
