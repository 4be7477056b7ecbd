use anyhow::{Context, Result};
use chrono::NaiveDate;
use model::entities::counter;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, Database, EntityTrait, Set};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::{debug, info, trace, warn};

const BATCH_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    count: i64,
}

/// Reads `date,count` rows. Negative counts are skipped; malformed rows abort the import.
pub fn parse_counter_csv<R: Read>(reader: R) -> Result<Vec<(NaiveDate, i64)>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let row = record.with_context(|| format!("Malformed row on line {}", line))?;
        if row.count < 0 {
            warn!("Skipping negative count {} for {} (line {})", row.count, row.date, line);
            continue;
        }
        rows.push((row.date, row.count));
    }

    Ok(rows)
}

/// Inserts the rows, replacing the count of days already present.
pub async fn upsert_counters<C: ConnectionTrait>(
    db: &C,
    rows: &[(NaiveDate, i64)],
) -> Result<usize> {
    for batch in rows.chunks(BATCH_SIZE) {
        let models = batch.iter().map(|(date, count)| counter::ActiveModel {
            date: Set(*date),
            count: Set(*count),
        });

        counter::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(counter::Column::Date)
                    .update_column(counter::Column::Count)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        trace!("Wrote batch of {} rows", batch.len());
    }

    Ok(rows.len())
}

pub async fn import_csv(csv_path: &str, database_url: &str) -> Result<()> {
    info!("Importing counters from {}", csv_path);

    let file = File::open(csv_path).with_context(|| format!("Cannot open {}", csv_path))?;
    let rows = parse_counter_csv(file)?;
    debug!("Parsed {} rows", rows.len());

    if rows.is_empty() {
        warn!("Nothing to import");
        return Ok(());
    }

    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;
    info!("Connected to database");

    let written = upsert_counters(&db, &rows).await?;
    info!("Imported {} daily counts", written);

    Ok(())
}
