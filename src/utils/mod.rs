//! Numerical utilities shared by the model code.

pub mod metrics;
pub mod optimization;

pub use metrics::{mae, mse, rmse};
pub use optimization::{minimize, SimplexOptions, SimplexResult};
