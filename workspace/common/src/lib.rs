//! Common transport-layer types shared between the JSON API and the dashboard page.
//! Handlers serialize these directly, and the page renderer reads them back,
//! so both surfaces always agree on shapes.

mod forecast;
mod images;
mod statistics;
mod timeseries;

pub use forecast::{Forecast, ForecastPoint};
pub use images::DecorativeImage;
pub use statistics::CountStatistics;
pub use timeseries::{CountPoint, CountTimeseries, DateRange};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    TimeseriesResponse = ApiResponse<CountTimeseries>,
    StatisticsResponse = ApiResponse<CountStatistics>,
    ForecastResponse = ApiResponse<Forecast>,
    ImagesResponse = ApiResponse<Vec<DecorativeImage>>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
