//! First-boot seeding of the sample device set.

use sqlx::SqlitePool;

use homehub_app::ports::DeviceRepository;
use homehub_domain::device::{Device, DeviceId, DeviceKind, DeviceStatus};
use homehub_domain::payload::Payload;

use crate::device_repo::SqliteDeviceRepository;
use crate::error::StorageError;

const COUNT_DEVICES: &str = "SELECT COUNT(*) FROM devices";

fn sample(id: &str, name: &str, kind: DeviceKind, room: &str, config: &str) -> Device {
    // The config literals are static and well-formed JSON objects.
    let config: Payload = serde_json::from_str(config).unwrap_or_default();
    Device {
        id: DeviceId::from(id),
        name: name.to_string(),
        kind,
        room: room.to_string(),
        status: DeviceStatus::Offline,
        last_seen: None,
        config,
    }
}

fn sample_devices() -> Vec<Device> {
    vec![
        sample(
            "living_room_light",
            "Living Room Light",
            DeviceKind::Light,
            "living_room",
            r#"{"brightness": 100}"#,
        ),
        sample(
            "living_room_fan",
            "Living Room Fan",
            DeviceKind::Fan,
            "living_room",
            r#"{"speed": 0}"#,
        ),
        sample(
            "bedroom_light",
            "Bedroom Light",
            DeviceKind::Light,
            "bedroom",
            r#"{"brightness": 100}"#,
        ),
        sample(
            "bedroom_ac",
            "Bedroom AC",
            DeviceKind::Ac,
            "bedroom",
            r#"{"temperature": 24, "mode": "cool"}"#,
        ),
        sample(
            "kitchen_light",
            "Kitchen Light",
            DeviceKind::Light,
            "kitchen",
            r#"{}"#,
        ),
        sample(
            "motion_sensor_entrance",
            "Entrance Motion Sensor",
            DeviceKind::MotionSensor,
            "entrance",
            r#"{}"#,
        ),
    ]
}

/// Insert the sample device set if the devices table is empty.
///
/// Idempotent: a non-empty table leaves the database untouched, so an
/// operator can delete or rename seeded devices without them coming back.
///
/// # Errors
///
/// Returns [`StorageError`] when counting or inserting fails.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), StorageError> {
    let (count,): (i64,) = sqlx::query_as(COUNT_DEVICES).fetch_one(pool).await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("seeding sample devices");
    let repo = SqliteDeviceRepository::new(pool.clone());
    for device in sample_devices() {
        if let Err(err) = repo.create(device).await {
            tracing::error!(error = %err, "failed to seed device");
        }
    }

    Ok(())
}
