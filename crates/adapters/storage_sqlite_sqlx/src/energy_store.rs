//! `SQLite` implementation of [`EnergyStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homehub_app::ports::EnergyStore;
use homehub_domain::error::HubError;
use homehub_domain::record::{EnergySample, EnergySummaryRow};

use crate::error::StorageError;

struct Wrapper(EnergySummaryRow);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(EnergySummaryRow {
            device: row.try_get("device")?,
            avg_power: row.try_get("avg_power")?,
            peak_power: row.try_get("peak_power")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO energy_consumption (device_id, power_watts, timestamp) VALUES (?, ?, ?)";

// Samples for devices without a row in `devices` are stored but excluded
// from the summary, since there is no name to report them under.
const SUMMARY_FOR_DAY: &str = "\
SELECT d.name AS device, AVG(e.power_watts) AS avg_power, MAX(e.power_watts) AS peak_power \
FROM energy_consumption e \
JOIN devices d ON e.device_id = d.id \
WHERE DATE(e.timestamp) = ? \
GROUP BY d.id, d.name \
ORDER BY d.name";

/// `SQLite`-backed append-only energy sample store.
pub struct SqliteEnergyStore {
    pool: SqlitePool,
}

impl SqliteEnergyStore {
    /// Create a new energy store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EnergyStore for SqliteEnergyStore {
    async fn append(&self, sample: EnergySample) -> Result<(), HubError> {
        sqlx::query(INSERT)
            .bind(sample.device_id.as_str())
            .bind(sample.power_watts)
            .bind(sample.timestamp.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn summary_for_day(
        &self,
        day: chrono::NaiveDate,
    ) -> Result<Vec<EnergySummaryRow>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SUMMARY_FOR_DAY)
            .bind(day.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
