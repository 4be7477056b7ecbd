use polars::prelude::*;
use tracing::instrument;

use common::CountStatistics;

use crate::dataset::{COUNT_COLUMN, CounterDataset};
use crate::error::Result;

/// Row count, max and mean of the `count` column.
#[instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn summarize(dataset: &CounterDataset) -> Result<CountStatistics> {
    let counts = dataset
        .frame()
        .column(COUNT_COLUMN)?
        .as_materialized_series()
        .i64()?;

    Ok(CountStatistics {
        total_days: dataset.len() as u64,
        max_daily_count: counts.max(),
        avg_daily_count: counts.mean(),
    })
}
