//! The daily counter table held as a polars DataFrame.
//!
//! A [`CounterDataset`] always has two columns, `date` (Date) and `count`
//! (Int64), with rows sorted by ascending date. It is built once from the
//! database and then only read: filtering returns a new dataset.

use chrono::NaiveDate;
use polars::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{debug, instrument, trace};

use common::{CountPoint, CountTimeseries};
use model::entities::counter;

use crate::error::{ComputeError, Result};

pub const DATE_COLUMN: &str = "date";
pub const COUNT_COLUMN: &str = "count";

/// Daily cyclist counts, sorted by date.
#[derive(Debug, Clone)]
pub struct CounterDataset {
    frame: DataFrame,
}

impl CounterDataset {
    /// Reads every counter row, ordered by date.
    #[instrument(skip(db))]
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let rows = counter::Entity::find()
            .order_by_asc(counter::Column::Date)
            .all(db)
            .await?;
        debug!("Loaded {} counter rows from the database", rows.len());

        Self::from_records(rows.into_iter().map(|row| (row.date, row.count)).collect())
    }

    /// Builds a dataset from `(date, count)` pairs in any order.
    pub fn from_records(mut records: Vec<(NaiveDate, i64)>) -> Result<Self> {
        records.sort_by_key(|(date, _)| *date);

        let (dates, counts): (Vec<NaiveDate>, Vec<i64>) = records.into_iter().unzip();
        let frame = DataFrame::new(vec![
            Series::new(DATE_COLUMN.into(), dates).into(),
            Series::new(COUNT_COLUMN.into(), counts).into(),
        ])?;

        Ok(Self { frame })
    }

    pub fn empty() -> Result<Self> {
        Self::from_records(Vec::new())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps the rows with `start <= date <= end`.
    ///
    /// Reversed bounds are not an error: no date satisfies them, so the
    /// result is simply empty.
    #[instrument(skip(self), fields(rows = self.len()))]
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                col(DATE_COLUMN)
                    .gt_eq(lit(start))
                    .and(col(DATE_COLUMN).lt_eq(lit(end))),
            )
            .collect()?;
        trace!("Filter kept {} of {} rows", frame.height(), self.len());

        Ok(Self { frame })
    }

    /// First and last dates, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let dates = self.dates()?;
        Ok(match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        })
    }

    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        self.frame
            .column(DATE_COLUMN)?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .enumerate()
            .map(|(i, date)| {
                date.ok_or_else(|| ComputeError::Date(format!("Missing date at row {}", i)))
            })
            .collect()
    }

    pub fn counts(&self) -> Result<Vec<i64>> {
        self.frame
            .column(COUNT_COLUMN)?
            .as_materialized_series()
            .i64()?
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                count.ok_or_else(|| ComputeError::Series(format!("Missing count at row {}", i)))
            })
            .collect()
    }

    pub fn to_points(&self) -> Result<Vec<CountPoint>> {
        let points = self
            .dates()?
            .into_iter()
            .zip(self.counts()?)
            .map(|(date, count)| CountPoint::new(date, count))
            .collect();
        Ok(points)
    }

    pub fn to_timeseries(&self) -> Result<CountTimeseries> {
        Ok(CountTimeseries::new(self.to_points()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn sample() -> CounterDataset {
        CounterDataset::from_records(vec![
            (day(3), 300),
            (day(1), 100),
            (day(5), 500),
            (day(2), 200),
            (day(4), 400),
        ])
        .unwrap()
    }

    #[test]
    fn test_records_are_sorted_by_date() {
        let dataset = sample();
        assert_eq!(
            dataset.dates().unwrap(),
            vec![day(1), day(2), day(3), day(4), day(5)]
        );
        assert_eq!(dataset.counts().unwrap(), vec![100, 200, 300, 400, 500]);
    }

    #[test]
    fn test_filter_range_is_inclusive() {
        let filtered = sample().filter_range(day(2), day(4)).unwrap();
        assert_eq!(filtered.dates().unwrap(), vec![day(2), day(3), day(4)]);
        assert_eq!(filtered.counts().unwrap(), vec![200, 300, 400]);
    }

    #[test]
    fn test_filter_range_single_day() {
        let filtered = sample().filter_range(day(3), day(3)).unwrap();
        assert_eq!(filtered.to_points().unwrap(), vec![CountPoint::new(day(3), 300)]);
    }

    #[test]
    fn test_filter_range_reversed_bounds_is_empty() {
        let filtered = sample().filter_range(day(4), day(2)).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.date_bounds().unwrap(), None);
    }

    #[test]
    fn test_filter_range_outside_data_is_empty() {
        let filtered = sample()
            .filter_range(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            )
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_date_bounds() {
        assert_eq!(sample().date_bounds().unwrap(), Some((day(1), day(5))));
        assert_eq!(CounterDataset::empty().unwrap().date_bounds().unwrap(), None);
    }

    #[test]
    fn test_to_timeseries_carries_range() {
        let series = sample().filter_range(day(2), day(3)).unwrap().to_timeseries().unwrap();
        assert_eq!(series.data_points.len(), 2);
        let range = series.date_range.unwrap();
        assert_eq!((range.start, range.end), (day(2), day(3)));
    }

    #[tokio::test]
    async fn test_load_reads_counters_table_in_order() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        for (d, count) in [(2, 20), (1, 10), (3, 30)] {
            counter::ActiveModel {
                date: Set(day(d)),
                count: Set(count),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let dataset = CounterDataset::load(&db).await.unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.counts().unwrap(), vec![10, 20, 30]);
    }
}
