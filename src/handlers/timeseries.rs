use axum::{extract::{Query, State}, http::StatusCode, response::Json};
use common::CountTimeseries;
use tracing::{debug, instrument};

use crate::handlers::internal_error;
use crate::helpers::dataset::{apply_selection, load_counters, resolve_selection};
use crate::schemas::{ApiResponse, AppState, RangeQuery};

/// Daily counts within an inclusive date range
#[utoipa::path(
    get,
    path = "/api/v1/counters/timeseries",
    tag = "counters",
    params(
        ("start_date" = Option<String>, Query, description = "First day to include (YYYY-MM-DD), defaults to the first recorded day"),
        ("end_date" = Option<String>, Query, description = "Last day to include (YYYY-MM-DD), defaults to the last recorded day"),
    ),
    responses(
        (status = 200, description = "Counter timeseries retrieved successfully", body = common::TimeseriesResponse),
        (status = 400, description = "Malformed date", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_counter_timeseries(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountTimeseries>>, StatusCode> {
    let dataset = load_counters(&state)
        .await
        .map_err(internal_error("Failed to load counters"))?;

    let selection = resolve_selection(&dataset, query.start_date, query.end_date)
        .map_err(internal_error("Failed to resolve date range"))?;
    let timeseries = apply_selection(&dataset, selection)
        .and_then(|filtered| filtered.to_timeseries())
        .map_err(internal_error("Failed to filter counters"))?;

    debug!("Returning {} points", timeseries.data_points.len());
    Ok(Json(ApiResponse::ok(
        timeseries,
        "Counter timeseries retrieved successfully",
    )))
}
