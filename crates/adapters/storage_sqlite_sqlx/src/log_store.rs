//! `SQLite` implementation of [`DeviceLogStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homehub_app::ports::DeviceLogStore;
use homehub_domain::device::DeviceId;
use homehub_domain::error::HubError;
use homehub_domain::record::{DeviceLogEntry, LogAction};

use crate::error::StorageError;

struct Wrapper(DeviceLogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let device_id: String = row.try_get("device_id")?;
        let action: String = row.try_get("action")?;
        let value: String = row.try_get("value")?;
        let timestamp: String = row.try_get("timestamp")?;

        let action = match action.as_str() {
            "status_update" => LogAction::StatusUpdate,
            "control_command" => LogAction::ControlCommand,
            other => {
                return Err(sqlx::Error::Decode(
                    format!("unknown log action {other:?}").into(),
                ));
            }
        };
        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(DeviceLogEntry {
            device_id: DeviceId::from(device_id),
            action,
            value,
            timestamp,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO device_logs (device_id, action, value, timestamp) VALUES (?, ?, ?, ?)";
const SELECT_BY_DEVICE: &str =
    "SELECT * FROM device_logs WHERE device_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?";

/// `SQLite`-backed append-only device log.
pub struct SqliteDeviceLogStore {
    pool: SqlitePool,
}

impl SqliteDeviceLogStore {
    /// Create a new log store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceLogStore for SqliteDeviceLogStore {
    async fn append(&self, entry: DeviceLogEntry) -> Result<(), HubError> {
        sqlx::query(INSERT)
            .bind(entry.device_id.as_str())
            .bind(entry.action.as_str())
            .bind(&entry.value)
            .bind(entry.timestamp.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn find_by_device(
        &self,
        id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<DeviceLogEntry>, HubError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE)
            .bind(id.as_str())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use homehub_domain::time::now;

    async fn setup() -> SqliteDeviceLogStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceLogStore::new(db.pool().clone())
    }

    fn entry(device: &str, action: LogAction) -> DeviceLogEntry {
        DeviceLogEntry {
            device_id: DeviceId::from(device),
            action,
            value: r#"{"status":"online"}"#.to_string(),
            timestamp: now(),
        }
    }

    #[tokio::test]
    async fn should_append_and_read_back_entries() {
        let store = setup().await;
        store
            .append(entry("light1", LogAction::StatusUpdate))
            .await
            .unwrap();
        store
            .append(entry("light1", LogAction::ControlCommand))
            .await
            .unwrap();

        let logs = store
            .find_by_device(&DeviceId::from("light1"), 10)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
        // Newest-first.
        assert_eq!(logs[0].action, LogAction::ControlCommand);
        assert_eq!(logs[1].action, LogAction::StatusUpdate);
    }

    #[tokio::test]
    async fn should_filter_by_device() {
        let store = setup().await;
        store
            .append(entry("light1", LogAction::StatusUpdate))
            .await
            .unwrap();
        store
            .append(entry("fan1", LogAction::StatusUpdate))
            .await
            .unwrap();

        let logs = store
            .find_by_device(&DeviceId::from("fan1"), 10)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].device_id, DeviceId::from("fan1"));
    }

    #[tokio::test]
    async fn should_accept_entries_for_unknown_devices() {
        // References to devices.id are advisory only.
        let store = setup().await;
        store
            .append(entry("never_provisioned", LogAction::StatusUpdate))
            .await
            .unwrap();

        let logs = store
            .find_by_device(&DeviceId::from("never_provisioned"), 10)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[tokio::test]
    async fn should_respect_limit() {
        let store = setup().await;
        for _ in 0..5 {
            store
                .append(entry("light1", LogAction::StatusUpdate))
                .await
                .unwrap();
        }

        let logs = store
            .find_by_device(&DeviceId::from("light1"), 3)
            .await
            .unwrap();
        assert_eq!(logs.len(), 3);
    }
}
