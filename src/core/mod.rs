//! Core data structures: raw observations and annual count series.

mod observation;
mod series;

pub use observation::{normalize, Observation, WideRecord};
pub use series::AnnualSeries;
