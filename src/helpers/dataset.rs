use chrono::NaiveDate;
use compute::{ComputeError, CounterDataset};
use tracing::{debug, instrument};

use crate::schemas::{AppState, CachedData};

/// Cache key of the memoized counters table.
pub const DATASET_CACHE_KEY: &str = "counters";

/// Returns the counters table, reading it from the database at most once per cache TTL.
#[instrument(skip(state))]
pub async fn load_counters(state: &AppState) -> Result<CounterDataset, ComputeError> {
    if let Some(CachedData::Dataset(dataset)) = state.cache.get(DATASET_CACHE_KEY).await {
        debug!("Counters served from cache ({} rows)", dataset.len());
        return Ok(dataset);
    }

    let dataset = CounterDataset::load(&state.db).await?;
    state
        .cache
        .insert(DATASET_CACHE_KEY.to_string(), CachedData::Dataset(dataset.clone()))
        .await;

    Ok(dataset)
}

/// Resolved bounds of a date selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Fills missing bounds with the dataset's first and last day, like the
/// date pickers' defaults.
pub fn resolve_selection(
    dataset: &CounterDataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Selection, ComputeError> {
    let bounds = dataset.date_bounds()?;
    Ok(Selection {
        start: start.or(bounds.map(|(first, _)| first)),
        end: end.or(bounds.map(|(_, last)| last)),
    })
}

/// Applies a selection; without both bounds (empty table, nothing chosen) the result is empty.
pub fn apply_selection(
    dataset: &CounterDataset,
    selection: Selection,
) -> Result<CounterDataset, ComputeError> {
    match (selection.start, selection.end) {
        (Some(start), Some(end)) => dataset.filter_range(start, end),
        _ => CounterDataset::empty(),
    }
}
