//! Pre-fit seasonal ARIMA `(p, d, q)(P, D, Q)s` model.
//!
//! The artifact carries the fitted coefficients together with the tail of the
//! (log-scale) series the model was fitted on. Sign conventions follow the
//! usual lag-polynomial form
//!
//! ```text
//! φ(B) Φ(B^s) ∇^d ∇_s^D y_t = c + θ(B) Θ(B^s) ε_t
//! φ(B) = 1 - φ1 B - ... - φp B^p        θ(B) = 1 + θ1 B + ... + θq B^q
//! Φ(B) = 1 - Φ1 B^s - ... - ΦP B^Ps     Θ(B) = 1 + Θ1 B^s + ... + ΘQ B^Qs
//! ```
//!
//! so `ar`/`seasonal_ar` hold `φi`/`Φi` and `ma`/`seasonal_ma` hold `θi`/`Θi`
//! exactly as a fitting library reports them.

use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};
use crate::forecast::{ForecastHorizon, Forecaster, LogForecast};

/// On-disk representation of a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SarimaArtifact {
    /// Non-seasonal `(p, d, q)`
    pub order: (usize, usize, usize),
    /// Seasonal `(P, D, Q, s)`
    #[serde(default)]
    pub seasonal_order: (usize, usize, usize, usize),
    #[serde(default)]
    pub ar: Vec<f64>,
    #[serde(default)]
    pub ma: Vec<f64>,
    #[serde(default)]
    pub seasonal_ar: Vec<f64>,
    #[serde(default)]
    pub seasonal_ma: Vec<f64>,
    /// Constant of the differenced equation
    #[serde(default)]
    pub intercept: f64,
    /// Date of the last value in `history`; forecasts start the day after
    pub last_date: NaiveDate,
    /// Observed log-scale series, oldest first
    pub history: Vec<f64>,
    /// In-sample innovations of the differenced series, if the fitting side
    /// exported them. Recomputed from `history` when absent.
    #[serde(default)]
    pub residuals: Option<Vec<f64>>,
}

/// A loaded, ready-to-predict model.
///
/// Seasonal and non-seasonal polynomials are multiplied out once at load time
/// so prediction is a plain ARMA recursion followed by undoing the
/// differencing.
#[derive(Debug, Clone)]
pub struct SarimaModel {
    artifact: SarimaArtifact,
    /// Lag coefficients of the expanded AR side (index 0 is lag 1)
    ar_lags: Vec<f64>,
    /// Lag coefficients of the expanded MA side (index 0 is lag 1)
    ma_lags: Vec<f64>,
    /// Coefficients of ∇^d ∇_s^D beyond the leading 1 (index 0 is lag 1)
    diff_lags: Vec<f64>,
    /// Differenced history
    differenced: Vec<f64>,
    residuals: Vec<f64>,
}

impl SarimaModel {
    /// Reads a JSON artifact from disk.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading model artifact from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let artifact: SarimaArtifact = serde_json::from_str(&raw)?;
        let model = Self::from_artifact(artifact)?;
        info!(
            order = ?model.artifact.order,
            seasonal_order = ?model.artifact.seasonal_order,
            last_date = %model.artifact.last_date,
            "Loaded SARIMA model"
        );
        Ok(model)
    }

    /// Checks the artifact's internal consistency and prepares it for prediction.
    ///
    /// Only the artifact itself is validated; it is never compared to the
    /// dataset it will be drawn next to.
    pub fn from_artifact(artifact: SarimaArtifact) -> Result<Self> {
        let (p, d, q) = artifact.order;
        let (sp, sd, sq, s) = artifact.seasonal_order;

        check_len("ar", artifact.ar.len(), p)?;
        check_len("ma", artifact.ma.len(), q)?;
        check_len("seasonal_ar", artifact.seasonal_ar.len(), sp)?;
        check_len("seasonal_ma", artifact.seasonal_ma.len(), sq)?;

        if s == 0 && (sp > 0 || sd > 0 || sq > 0) {
            return Err(ComputeError::ModelArtifact(
                "seasonal period must be at least 1 when seasonal terms are present".to_string(),
            ));
        }

        let all_coefficients = artifact
            .ar
            .iter()
            .chain(&artifact.ma)
            .chain(&artifact.seasonal_ar)
            .chain(&artifact.seasonal_ma)
            .chain(std::iter::once(&artifact.intercept))
            .chain(&artifact.history);
        if all_coefficients.into_iter().any(|v| !v.is_finite()) {
            return Err(ComputeError::ModelArtifact(
                "artifact contains NaN or infinite values".to_string(),
            ));
        }

        let ar_poly = poly_mul(
            &lag_poly(&artifact.ar, 1, -1.0),
            &lag_poly(&artifact.seasonal_ar, s, -1.0),
        );
        let ma_poly = poly_mul(
            &lag_poly(&artifact.ma, 1, 1.0),
            &lag_poly(&artifact.seasonal_ma, s, 1.0),
        );
        let mut diff_poly = vec![1.0];
        for _ in 0..d {
            diff_poly = poly_mul(&diff_poly, &[1.0, -1.0]);
        }
        for _ in 0..sd {
            diff_poly = poly_mul(&diff_poly, &lag_poly(&[1.0], s, -1.0));
        }

        // AR side moves to the right-hand side with flipped sign
        let ar_lags: Vec<f64> = ar_poly[1..].iter().map(|c| -c).collect();
        let ma_lags: Vec<f64> = ma_poly[1..].to_vec();
        let diff_lags: Vec<f64> = diff_poly[1..].to_vec();

        let required = diff_lags.len() + ar_lags.len().max(1);
        if artifact.history.len() < required {
            return Err(ComputeError::ModelArtifact(format!(
                "history has {} values, at least {} required by the model orders",
                artifact.history.len(),
                required
            )));
        }

        let differenced: Vec<f64> = (diff_lags.len()..artifact.history.len())
            .map(|t| {
                artifact.history[t]
                    + diff_lags
                        .iter()
                        .enumerate()
                        .map(|(k, c)| c * artifact.history[t - k - 1])
                        .sum::<f64>()
            })
            .collect();

        let residuals = match &artifact.residuals {
            Some(residuals) => {
                check_len("residuals", residuals.len(), differenced.len())?;
                residuals.clone()
            }
            None => innovations(&differenced, artifact.intercept, &ar_lags, &ma_lags),
        };

        Ok(Self {
            artifact,
            ar_lags,
            ma_lags,
            diff_lags,
            differenced,
            residuals,
        })
    }

    pub fn artifact(&self) -> &SarimaArtifact {
        &self.artifact
    }

    pub fn last_date(&self) -> NaiveDate {
        self.artifact.last_date
    }

    /// Point forecasts on the log scale, future shocks set to zero.
    pub fn forecast_values(&self, steps: usize) -> Vec<f64> {
        let mut w = self.differenced.clone();
        let mut e = self.residuals.clone();
        let mut y = self.artifact.history.clone();

        for _ in 0..steps {
            let next_w = one_step(&w, &e, self.artifact.intercept, &self.ar_lags, &self.ma_lags);
            w.push(next_w);
            e.push(0.0);

            let integrated = next_w
                - self
                    .diff_lags
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c * y[y.len() - k - 1])
                    .sum::<f64>();
            y.push(integrated);
        }

        y.split_off(self.artifact.history.len())
    }
}

impl Forecaster for SarimaModel {
    #[instrument(skip(self))]
    fn predict(&self, horizon: ForecastHorizon) -> Result<LogForecast> {
        let values = self.forecast_values(horizon.days());

        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                self.artifact
                    .last_date
                    .checked_add_days(Days::new(i as u64 + 1))
                    .map(|date| (date, value))
                    .ok_or_else(|| {
                        ComputeError::Date(format!(
                            "forecast date {} days after {} is out of range",
                            i + 1,
                            self.artifact.last_date
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Predicted {} days", points.len());
        Ok(LogForecast { points })
    }
}

fn check_len(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(ComputeError::ModelArtifact(format!(
            "{} has {} coefficients, model order requires {}",
            name, actual, expected
        )));
    }
    Ok(())
}

/// `1 + sign * (c1 B^step + c2 B^2step + ...)` as a dense coefficient vector.
fn lag_poly(coefficients: &[f64], step: usize, sign: f64) -> Vec<f64> {
    if coefficients.is_empty() || step == 0 {
        return vec![1.0];
    }
    let mut poly = vec![0.0; coefficients.len() * step + 1];
    poly[0] = 1.0;
    for (i, c) in coefficients.iter().enumerate() {
        poly[(i + 1) * step] = sign * c;
    }
    poly
}

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Expected next value of the differenced series given its past and past shocks.
/// Lags reaching before the start of the series count as zero.
fn one_step(w: &[f64], e: &[f64], intercept: f64, ar_lags: &[f64], ma_lags: &[f64]) -> f64 {
    let ar: f64 = ar_lags
        .iter()
        .enumerate()
        .filter_map(|(k, c)| w.len().checked_sub(k + 1).map(|idx| c * w[idx]))
        .sum();
    let ma: f64 = ma_lags
        .iter()
        .enumerate()
        .filter_map(|(k, c)| e.len().checked_sub(k + 1).map(|idx| c * e[idx]))
        .sum();
    intercept + ar + ma
}

/// One-step-ahead errors over the differenced history, zero pre-sample.
fn innovations(w: &[f64], intercept: f64, ar_lags: &[f64], ma_lags: &[f64]) -> Vec<f64> {
    let mut e = Vec::with_capacity(w.len());
    for t in 0..w.len() {
        let expected = one_step(&w[..t], &e, intercept, ar_lags, ma_lags);
        e.push(w[t] - expected);
    }
    e
}
