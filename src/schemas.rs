use chrono::NaiveDate;
use common::{
    CountPoint, CountStatistics, CountTimeseries, DateRange, DecorativeImage, Forecast,
    ForecastPoint, ForecastResponse, ImagesResponse, StatisticsResponse, TimeseriesResponse,
};
use compute::{CounterDataset, ForecastHorizon, Forecaster};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::helpers::images::ImageClient;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Memoized reads of the counters table
    pub cache: Cache<String, CachedData>,
    /// Pre-fit forecasting model
    pub forecaster: Arc<dyn Forecaster>,
    /// Client for the decorative image APIs
    pub images: ImageClient,
    /// Horizon used when a request does not ask for one
    pub default_horizon: ForecastHorizon,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Dataset(CounterDataset),
}

/// Query parameters selecting a date range
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RangeQuery {
    /// First day to include (YYYY-MM-DD), defaults to the first recorded day
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD), defaults to the last recorded day
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ForecastQuery {
    /// Days to forecast, clamped to 1..=365
    #[serde(default, deserialize_with = "saturating_horizon")]
    pub horizon: Option<i64>,
}

/// Query parameters of the dashboard page (the form it submits to itself)
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "saturating_horizon")]
    pub horizon: Option<i64>,
}

/// Treats a missing or blank form field as absent instead of rejecting the request.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    use serde::de::Error;

    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(D::Error::custom),
    }
}

/// Like [`empty_as_none`], but integers beyond `i64` saturate so they still clamp.
fn saturating_horizon<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use std::num::IntErrorKind;

    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.parse::<i64>() {
            Ok(days) => Ok(Some(days)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
                _ => Err(D::Error::custom(e)),
            },
        },
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::timeseries::get_counter_timeseries,
        crate::handlers::statistics::get_counter_statistics,
        crate::handlers::forecast::get_forecast,
        crate::handlers::images::get_decorative_images,
    ),
    components(
        schemas(
            TimeseriesResponse,
            StatisticsResponse,
            ForecastResponse,
            ImagesResponse,
            ErrorResponse,
            HealthResponse,
            RangeQuery,
            ForecastQuery,
            CountPoint,
            CountTimeseries,
            DateRange,
            CountStatistics,
            Forecast,
            ForecastPoint,
            DecorativeImage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "counters", description = "Bicycle counter history and statistics"),
        (name = "forecast", description = "SARIMA forecast endpoints"),
        (name = "images", description = "Decorative images"),
    ),
    info(
        title = "Paris Cyclists API",
        description = "Daily Paris bicycle counter data, summary statistics and a seasonal forecast",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
