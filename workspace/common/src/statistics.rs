use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three summary figures shown under the history chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CountStatistics {
    /// Number of daily readings
    pub total_days: u64,
    /// Highest daily count, absent for an empty dataset
    pub max_daily_count: Option<i64>,
    /// Mean daily count, absent for an empty dataset
    pub avg_daily_count: Option<f64>,
}

impl CountStatistics {
    pub fn empty() -> Self {
        Self {
            total_days: 0,
            max_daily_count: None,
            avg_daily_count: None,
        }
    }
}
