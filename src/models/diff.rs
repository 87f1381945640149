//! Differencing utilities for seasonal ARIMA models.

/// Apply `d` rounds of first differencing to a series.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply `d` rounds of seasonal differencing with the given period.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Reverse first differencing: continue the original series with the values
/// implied by the forecasted differences.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        // Initial value is the last point of the series differenced `level`
        // times; cumulative summation continues from there.
        let intermediate = difference(original, level);
        let mut cumsum = *intermediate.last().unwrap_or(&0.0);
        let mut integrated = Vec::with_capacity(result.len());
        for &diff in &result {
            cumsum += diff;
            integrated.push(cumsum);
        }
        result = integrated;
    }
    result
}

/// Reverse seasonal differencing: each forecasted value is the seasonal
/// difference plus the value one period earlier in the extended series.
pub fn seasonal_integrate(
    differenced: &[f64],
    original: &[f64],
    d: usize,
    period: usize,
) -> Vec<f64> {
    if d == 0 || period == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let mut extended = seasonal_difference(original, level, period);
        let mut integrated = Vec::with_capacity(result.len());
        for &diff in &result {
            let t = extended.len();
            let prev = if t >= period {
                extended[t - period]
            } else {
                0.0
            };
            let value = diff + prev;
            extended.push(value);
            integrated.push(value);
        }
        result = integrated;
    }
    result
}
