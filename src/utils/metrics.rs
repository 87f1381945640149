//! Forecast accuracy metrics.

use crate::error::{ForecastError, Result};

/// Mean squared error between actual and predicted values.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;
    let n = actual.len() as f64;
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n)
}

/// Mean absolute error between actual and predicted values.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;
    let n = actual.len() as f64;
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n)
}

/// Root mean squared error between actual and predicted values.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mse(actual, predicted)?.sqrt())
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "length mismatch: {} actual vs {} predicted",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_has_zero_error() {
        let values = vec![1.0, 2.0, 3.0];
        assert_relative_eq!(mse(&values, &values).unwrap(), 0.0);
        assert_relative_eq!(mae(&values, &values).unwrap(), 0.0);
        assert_relative_eq!(rmse(&values, &values).unwrap(), 0.0);
    }

    #[test]
    fn known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5];
        assert_relative_eq!(mse(&actual, &predicted).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(mae(&actual, &predicted).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(rmse(&actual, &predicted).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(mse(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(mse(&[], &[]), Err(ForecastError::EmptyData));
    }
}
