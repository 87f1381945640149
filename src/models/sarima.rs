//! Seasonal ARIMA model fitted by conditional least squares.

use std::fmt;

use crate::error::{ForecastError, Result};
use crate::models::diff::{difference, integrate, seasonal_difference, seasonal_integrate};
use crate::utils::optimization::{minimize, SimplexOptions};

/// SARIMA model specification: (p, d, q)(P, D, Q)[s].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SARIMASpec {
    /// Non-seasonal AR order.
    pub p: usize,
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Non-seasonal MA order.
    pub q: usize,
    /// Seasonal AR order.
    pub cap_p: usize,
    /// Seasonal differencing order.
    pub cap_d: usize,
    /// Seasonal MA order.
    pub cap_q: usize,
    /// Seasonal period.
    pub s: usize,
}

impl SARIMASpec {
    /// Create a new specification.
    pub fn new(
        p: usize,
        d: usize,
        q: usize,
        cap_p: usize,
        cap_d: usize,
        cap_q: usize,
        s: usize,
    ) -> Self {
        Self {
            p,
            d,
            q,
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// Total number of estimated parameters (coefficients + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + self.cap_p + self.cap_q + 1
    }

    /// Longest lag referenced by the recursion on the stationary scale.
    pub fn lag_span(&self) -> usize {
        self.p.max(self.q).max(self.s * self.cap_p.max(self.cap_q))
    }
}

impl fmt::Display for SARIMASpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SARIMA({},{},{})({},{},{})[{}]",
            self.p, self.d, self.q, self.cap_p, self.cap_d, self.cap_q, self.s
        )
    }
}

/// Seasonal ARIMA forecasting model.
///
/// Differences the series `d` times regularly and `D` times seasonally, then
/// models the stationary remainder with additive seasonal AR/MA terms:
///
/// ```text
/// w_t = c + Σ φ_i (w_{t-i} − c) + Σ Φ_I (w_{t-I·s} − c)
///         + Σ θ_j e_{t-j}       + Σ Θ_J e_{t-J·s} + e_t
/// ```
///
/// Coefficients minimize the conditional sum of squares via simplex search.
/// Bounds are deliberately wider than the unit interval so borderline
/// non-stationary configurations fit instead of erroring; explosive fits are
/// expected to lose on validation error during model selection.
#[derive(Debug, Clone)]
pub struct SARIMA {
    spec: SARIMASpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
    intercept: f64,
    /// Original series, for integration.
    original: Option<Vec<f64>>,
    /// Series after regular differencing.
    regular: Option<Vec<f64>>,
    /// Series after regular and seasonal differencing.
    stationary: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

/// Coefficient bound. Relaxed past the stationarity/invertibility region.
const COEF_BOUND: f64 = 1.5;

impl SARIMA {
    /// Create an unfitted model for the given specification.
    pub fn new(spec: SARIMASpec) -> Self {
        Self {
            spec,
            ar: vec![],
            ma: vec![],
            seasonal_ar: vec![],
            seasonal_ma: vec![],
            intercept: 0.0,
            original: None,
            regular: None,
            stationary: None,
            residuals: None,
            residual_variance: None,
            aic: None,
            bic: None,
        }
    }

    /// Get the model specification.
    pub fn spec(&self) -> SARIMASpec {
        self.spec
    }

    /// Get the intercept on the stationary scale.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Get MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Get seasonal AR coefficients.
    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.seasonal_ar
    }

    /// Get seasonal MA coefficients.
    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.seasonal_ma
    }

    /// Get AIC, if the fit produced a positive residual variance.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Get BIC, if the fit produced a positive residual variance.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Get residuals on the stationary scale.
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    /// Get the residual variance on the stationary scale.
    pub fn residual_variance(&self) -> Option<f64> {
        self.residual_variance
    }

    /// One-step prediction at index `t` of the stationary series.
    fn predict_at(
        spec: &SARIMASpec,
        w: &[f64],
        residuals: &[f64],
        t: usize,
        intercept: f64,
        ar: &[f64],
        ma: &[f64],
        seasonal_ar: &[f64],
        seasonal_ma: &[f64],
    ) -> f64 {
        let mut pred = intercept;
        for i in 0..spec.p {
            pred += ar[i] * (w[t - 1 - i] - intercept);
        }
        for i in 0..spec.cap_p {
            pred += seasonal_ar[i] * (w[t - (i + 1) * spec.s] - intercept);
        }
        for i in 0..spec.q {
            pred += ma[i] * residuals[t - 1 - i];
        }
        for i in 0..spec.cap_q {
            pred += seasonal_ma[i] * residuals[t - (i + 1) * spec.s];
        }
        pred
    }

    fn split_params<'a>(
        spec: &SARIMASpec,
        params: &'a [f64],
    ) -> (f64, &'a [f64], &'a [f64], &'a [f64], &'a [f64]) {
        let intercept = params[0];
        let mut at = 1;
        let ar = &params[at..at + spec.p];
        at += spec.p;
        let ma = &params[at..at + spec.q];
        at += spec.q;
        let seasonal_ar = &params[at..at + spec.cap_p];
        at += spec.cap_p;
        let seasonal_ma = &params[at..at + spec.cap_q];
        (intercept, ar, ma, seasonal_ar, seasonal_ma)
    }

    /// Conditional sum of squares for a parameter vector.
    fn css(spec: &SARIMASpec, w: &[f64], params: &[f64]) -> f64 {
        let start = spec.lag_span();
        if w.len() <= start {
            return f64::MAX;
        }

        let (intercept, ar, ma, seasonal_ar, seasonal_ma) = Self::split_params(spec, params);
        let mut residuals = vec![0.0; w.len()];
        let mut css = 0.0;

        for t in start..w.len() {
            let pred =
                Self::predict_at(spec, w, &residuals, t, intercept, ar, ma, seasonal_ar, seasonal_ma);
            let error = w[t] - pred;
            residuals[t] = error;
            css += error * error;
            if !css.is_finite() {
                return f64::MAX;
            }
        }

        css
    }

    /// Estimate parameters by minimizing CSS on the stationary series.
    fn estimate_parameters(&mut self, w: &[f64]) -> Result<()> {
        let spec = self.spec;
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let n_coefs = spec.num_params() - 1;

        if n_coefs == 0 {
            self.intercept = mean;
            return Ok(());
        }

        let mut initial = vec![0.0; spec.num_params()];
        initial[0] = mean;
        for (i, value) in initial.iter_mut().skip(1).enumerate() {
            *value = 0.1 / (i + 1) as f64;
        }

        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-COEF_BOUND, COEF_BOUND)).take(n_coefs));

        let options = SimplexOptions {
            max_iter: 1000,
            tolerance: 1e-8,
            ..Default::default()
        };
        let result = minimize(
            |params| Self::css(&spec, w, params),
            &initial,
            Some(&bounds),
            &options,
        );

        if !result.value.is_finite() || result.value == f64::MAX {
            return Err(ForecastError::ComputationError(
                "objective did not reach a finite value".to_string(),
            ));
        }

        let (intercept, ar, ma, seasonal_ar, seasonal_ma) =
            Self::split_params(&spec, &result.point);
        self.intercept = intercept;
        self.ar = ar.to_vec();
        self.ma = ma.to_vec();
        self.seasonal_ar = seasonal_ar.to_vec();
        self.seasonal_ma = seasonal_ma.to_vec();
        Ok(())
    }

    /// Compute residuals, residual variance, and information criteria.
    fn calculate_residuals(&mut self, w: &[f64]) -> Result<()> {
        let spec = self.spec;
        let start = spec.lag_span();
        let mut residuals = vec![0.0; w.len()];

        for t in start..w.len() {
            let pred = Self::predict_at(
                &spec,
                w,
                &residuals,
                t,
                self.intercept,
                &self.ar,
                &self.ma,
                &self.seasonal_ar,
                &self.seasonal_ma,
            );
            residuals[t] = w[t] - pred;
        }

        let n_eff = w.len() - start;
        let variance = residuals[start..].iter().map(|r| r * r).sum::<f64>() / n_eff as f64;
        if !variance.is_finite() {
            return Err(ForecastError::ComputationError(
                "non-finite residual variance".to_string(),
            ));
        }

        if variance > 0.0 {
            let n_eff = n_eff as f64;
            let k = spec.num_params() as f64;
            let ll = -0.5 * n_eff * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
            self.aic = Some(-2.0 * ll + 2.0 * k);
            self.bic = Some(-2.0 * ll + k * n_eff.ln());
        }

        self.residuals = Some(residuals);
        self.residual_variance = Some(variance);
        Ok(())
    }

    /// Fit the model to a series of values.
    pub fn fit(&mut self, values: &[f64]) -> Result<()> {
        let spec = self.spec;
        let needed = spec.d + spec.cap_d * spec.s + spec.lag_span() + 1;
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let regular = difference(values, spec.d);
        let stationary = seasonal_difference(&regular, spec.cap_d, spec.s);

        self.estimate_parameters(&stationary)?;
        self.calculate_residuals(&stationary)?;

        self.original = Some(values.to_vec());
        self.regular = Some(regular);
        self.stationary = Some(stationary);
        Ok(())
    }

    /// Forecast `horizon` steps beyond the fitted series.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let regular = self.regular.as_ref().ok_or(ForecastError::FitRequired)?;
        let stationary = self.stationary.as_ref().ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(vec![]);
        }

        let spec = self.spec;
        let mut extended = stationary.clone();
        let mut extended_residuals = residuals.clone();

        for _ in 0..horizon {
            let t = extended.len();
            let pred = Self::predict_at(
                &spec,
                &extended,
                &extended_residuals,
                t,
                self.intercept,
                &self.ar,
                &self.ma,
                &self.seasonal_ar,
                &self.seasonal_ma,
            );
            extended.push(pred);
            // Future shocks are their expectation, zero.
            extended_residuals.push(0.0);
        }

        let forecast_stationary = extended[stationary.len()..].to_vec();
        let forecast_regular =
            seasonal_integrate(&forecast_stationary, regular, spec.cap_d, spec.s);
        Ok(integrate(&forecast_regular, original, spec.d))
    }
}
