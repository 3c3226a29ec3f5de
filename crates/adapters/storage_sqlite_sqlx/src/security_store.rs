//! `SQLite` implementation of [`SecurityEventStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homehub_app::ports::SecurityEventStore;
use homehub_domain::device::DeviceId;
use homehub_domain::error::HubError;
use homehub_domain::record::SecurityEvent;

use crate::error::StorageError;

struct Wrapper(SecurityEvent);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let sensor_id: String = row.try_get("sensor_id")?;
        let event_type: String = row.try_get("event_type")?;
        let description: String = row.try_get("description")?;
        let timestamp: String = row.try_get("timestamp")?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(SecurityEvent {
            sensor_id: DeviceId::from(sensor_id),
            event_type,
            description,
            timestamp,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO security_events (sensor_id, event_type, description, timestamp) VALUES (?, ?, ?, ?)";
const SELECT_RECENT: &str =
    "SELECT * FROM security_events ORDER BY timestamp DESC, id DESC LIMIT ?";

/// `SQLite`-backed append-only security event store.
pub struct SqliteSecurityEventStore {
    pool: SqlitePool,
}

impl SqliteSecurityEventStore {
    /// Create a new security event store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SecurityEventStore for SqliteSecurityEventStore {
    async fn append(&self, event: SecurityEvent) -> Result<(), HubError> {
        sqlx::query(INSERT)
            .bind(event.sensor_id.as_str())
            .bind(&event.event_type)
            .bind(&event.description)
            .bind(event.timestamp.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SecurityEvent>, HubError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
