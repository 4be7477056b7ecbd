//! Forecasting with a pre-fit seasonal model.
//!
//! The model is trained elsewhere and shipped as an artifact; this module only
//! knows how to read it back and ask it for predictions. Predictions come out
//! on the log scale the model was trained on and are exponentiated before
//! being shown.

pub mod horizon;
pub mod sarima;

use chrono::NaiveDate;

use common::{Forecast, ForecastPoint};

use crate::error::Result;

pub use horizon::ForecastHorizon;
pub use sarima::{SarimaArtifact, SarimaModel};

/// Anything that can predict the next days of log-scale counts.
pub trait Forecaster: Send + Sync + std::fmt::Debug {
    /// Predicts `horizon` consecutive days following the model's last observation.
    fn predict(&self, horizon: ForecastHorizon) -> Result<LogForecast>;
}

/// Predictions on the model's log scale, indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct LogForecast {
    pub points: Vec<(NaiveDate, f64)>,
}

impl LogForecast {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Back-transforms every value with `exp`, giving non-negative counts.
    pub fn to_counts(&self) -> Forecast {
        Forecast {
            horizon: self.points.len() as u32,
            data_points: self
                .points
                .iter()
                .map(|(date, value)| ForecastPoint {
                    date: *date,
                    count: value.exp(),
                })
                .collect(),
        }
    }
}
