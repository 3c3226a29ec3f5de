//! `SQLite` implementation of [`DeviceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homehub_app::ports::DeviceRepository;
use homehub_domain::device::{Device, DeviceId, DeviceKind, DeviceStatus};
use homehub_domain::error::HubError;
use homehub_domain::payload::Payload;
use homehub_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let kind: String = row.try_get("kind")?;
        let room: String = row.try_get("room")?;
        let status: String = row.try_get("status")?;
        let last_seen: Option<String> = row.try_get("last_seen")?;
        let config: String = row.try_get("config")?;

        let last_seen = last_seen
            .map(|s| chrono::DateTime::parse_from_rfc3339(&s).map(|dt| dt.to_utc()))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let config: Payload =
            serde_json::from_str(&config).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id: DeviceId::from(id),
            name,
            kind: DeviceKind::from(kind),
            room,
            status: DeviceStatus::from(status),
            last_seen,
            config,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, kind, room, status, last_seen, config) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY id";
const APPLY_STATUS: &str = "UPDATE devices SET status = ?, last_seen = ? WHERE id = ?";

/// `SQLite`-backed device repository.
///
/// Row updates for the same device go through the pool's serialized write
/// path, so concurrent status updates never produce a torn row.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, HubError> {
        let config = serde_json::to_string(&device.config).map_err(StorageError::from)?;
        sqlx::query(INSERT)
            .bind(device.id.as_str())
            .bind(&device.name)
            .bind(device.kind.as_str())
            .bind(&device.room)
            .bind(device.status.as_str())
            .bind(device.last_seen.map(|ts| ts.to_rfc3339()))
            .bind(config)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(device)
    }

    async fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, HubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Device>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn apply_status(
        &self,
        id: &DeviceId,
        status: &DeviceStatus,
        last_seen: Timestamp,
    ) -> Result<u64, HubError> {
        let result = sqlx::query(APPLY_STATUS)
            .bind(status.as_str())
            .bind(last_seen.to_rfc3339())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use homehub_domain::time::now;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn test_device(id: &str) -> Device {
        let mut config = Payload::default();
        config.insert("brightness", serde_json::json!(100));
        Device {
            id: DeviceId::from(id),
            name: "Living Room Light".to_string(),
            kind: DeviceKind::Light,
            room: "living_room".to_string(),
            status: DeviceStatus::Offline,
            last_seen: None,
            config,
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device_when_valid() {
        let repo = setup().await;
        repo.create(test_device("light1")).await.unwrap();

        let fetched = repo
            .get_by_id(&DeviceId::from("light1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Living Room Light");
        assert_eq!(fetched.kind, DeviceKind::Light);
        assert_eq!(fetched.config.brightness(), Some(100.0));
        assert!(fetched.last_seen.is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(&DeviceId::from("ghost")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let repo = setup().await;
        repo.create(test_device("light1")).await.unwrap();
        repo.create(test_device("light2")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_apply_status_and_stamp_last_seen() {
        let repo = setup().await;
        repo.create(test_device("light1")).await.unwrap();

        let affected = repo
            .apply_status(&DeviceId::from("light1"), &DeviceStatus::Online, now())
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let fetched = repo
            .get_by_id(&DeviceId::from("light1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, DeviceStatus::Online);
        assert!(fetched.last_seen.is_some());
    }

    #[tokio::test]
    async fn should_report_zero_rows_for_unknown_device() {
        let repo = setup().await;
        let affected = repo
            .apply_status(&DeviceId::from("ghost"), &DeviceStatus::Online, now())
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn should_preserve_free_form_status_through_roundtrip() {
        let repo = setup().await;
        repo.create(test_device("light1")).await.unwrap();
        repo.apply_status(
            &DeviceId::from("light1"),
            &DeviceStatus::from("rebooting"),
            now(),
        )
        .await
        .unwrap();

        let fetched = repo
            .get_by_id(&DeviceId::from("light1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status.as_str(), "rebooting");
    }
}
