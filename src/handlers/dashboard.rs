use axum::{extract::{Query, State}, http::StatusCode, response::Html};
use compute::{summarize, ForecastHorizon};
use tracing::{info, instrument};

use crate::handlers::internal_error;
use crate::helpers::charts::{forecast_chart, history_chart};
use crate::helpers::dataset::{apply_selection, load_counters, resolve_selection};
use crate::helpers::page::{render_dashboard, DashboardView};
use crate::schemas::{AppState, DashboardQuery};

/// The dashboard page. Its form submits back here with the chosen range and horizon.
#[instrument(skip(state))]
pub async fn dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Html<String>, StatusCode> {
    let (images, dataset) = tokio::join!(state.images.fetch_all(), load_counters(&state));
    let dataset = dataset.map_err(internal_error("Failed to load counters"))?;

    let bounds = dataset
        .date_bounds()
        .map_err(internal_error("Failed to read date bounds"))?;
    let selection = resolve_selection(&dataset, query.start_date, query.end_date)
        .map_err(internal_error("Failed to resolve date range"))?;
    let filtered = apply_selection(&dataset, selection)
        .map_err(internal_error("Failed to filter counters"))?;
    let history = history_chart(&filtered).map_err(internal_error("Failed to build chart"))?;

    // Figures cover every recorded day, not just the selection
    let statistics =
        summarize(&dataset).map_err(internal_error("Failed to compute statistics"))?;

    let horizon = query
        .horizon
        .map(ForecastHorizon::clamped)
        .unwrap_or(state.default_horizon);
    let forecast = state
        .forecaster
        .predict(horizon)
        .map_err(internal_error("Forecast failed"))?
        .to_counts();
    let forecast =
        forecast_chart(&dataset, &forecast).map_err(internal_error("Failed to build chart"))?;

    info!(
        rows = filtered.len(),
        %horizon,
        "Rendering dashboard"
    );

    Ok(Html(render_dashboard(&DashboardView {
        images,
        selection,
        bounds,
        history,
        statistics,
        horizon,
        forecast,
    })))
}
