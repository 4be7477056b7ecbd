use axum::{extract::{Query, State}, http::StatusCode, response::Json};
use common::Forecast;
use compute::ForecastHorizon;
use tracing::{debug, instrument};

use crate::handlers::internal_error;
use crate::schemas::{ApiResponse, AppState, ForecastQuery};

/// Forecast of the next days in cyclist counts
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(
        ("horizon" = Option<i64>, Query, description = "Days to forecast, clamped to 1..=365 (default 31)"),
    ),
    responses(
        (status = 200, description = "Forecast computed successfully", body = common::ForecastResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Forecast>>, StatusCode> {
    let horizon = query
        .horizon
        .map(ForecastHorizon::clamped)
        .unwrap_or(state.default_horizon);
    debug!(%horizon, "Forecasting");

    let forecast = state
        .forecaster
        .predict(horizon)
        .map_err(internal_error("Forecast failed"))?
        .to_counts();

    Ok(Json(ApiResponse::ok(forecast, "Forecast computed successfully")))
}
