use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One daily counter reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CountPoint {
    /// Day of the measurement
    pub date: NaiveDate,
    /// Number of cyclists counted that day
    pub count: i64,
}

impl CountPoint {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }
}

/// Inclusive date range covered by a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateRange {
    /// First date (inclusive)
    pub start: NaiveDate,
    /// Last date (inclusive)
    pub end: NaiveDate,
}

/// Ordered series of counter readings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CountTimeseries {
    /// Readings ordered by date
    pub data_points: Vec<CountPoint>,
    /// Range spanned by `data_points`, absent when the series is empty
    pub date_range: Option<DateRange>,
}

impl CountTimeseries {
    /// Builds a series from points already sorted by date.
    pub fn new(data_points: Vec<CountPoint>) -> Self {
        let date_range = match (data_points.first(), data_points.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.date,
                end: last.date,
            }),
            _ => None,
        };

        Self {
            data_points,
            date_range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}
