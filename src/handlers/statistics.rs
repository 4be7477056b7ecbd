use axum::{extract::{Query, State}, http::StatusCode, response::Json};
use common::CountStatistics;
use compute::summarize;
use tracing::instrument;

use crate::handlers::internal_error;
use crate::helpers::dataset::{apply_selection, load_counters, resolve_selection};
use crate::schemas::{ApiResponse, AppState, RangeQuery};

/// Count, maximum and mean of the daily readings
///
/// Computed over the whole table unless a range is given.
#[utoipa::path(
    get,
    path = "/api/v1/counters/statistics",
    tag = "counters",
    params(
        ("start_date" = Option<String>, Query, description = "First day to include (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Last day to include (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Counter statistics retrieved successfully", body = common::StatisticsResponse),
        (status = 400, description = "Malformed date", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_counter_statistics(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountStatistics>>, StatusCode> {
    let dataset = load_counters(&state)
        .await
        .map_err(internal_error("Failed to load counters"))?;

    let statistics = if query.start_date.is_none() && query.end_date.is_none() {
        summarize(&dataset)
    } else {
        resolve_selection(&dataset, query.start_date, query.end_date)
            .and_then(|selection| apply_selection(&dataset, selection))
            .and_then(|filtered| summarize(&filtered))
    }
    .map_err(internal_error("Failed to compute statistics"))?;

    Ok(Json(ApiResponse::ok(
        statistics,
        "Counter statistics retrieved successfully",
    )))
}
