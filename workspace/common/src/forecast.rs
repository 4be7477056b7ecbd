use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Predicted cyclist count for one future day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Predicted count (back on the count scale, never negative)
    pub count: f64,
}

/// Forecast returned for a requested horizon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Forecast {
    /// Number of days predicted
    pub horizon: u32,
    /// One point per predicted day, in date order
    pub data_points: Vec<ForecastPoint>,
}
