//! Storage ports — repository traits for the persistent store.
//!
//! The devices table is row-updated (status/`last_seen`), so writes
//! touching the same device row must be serialized by the implementation.
//! The other three tables are append-only and independent: no cross-table
//! locking is required.

use std::future::Future;

use homehub_domain::device::{Device, DeviceId, DeviceStatus};
use homehub_domain::error::HubError;
use homehub_domain::record::{DeviceLogEntry, EnergySample, EnergySummaryRow, SecurityEvent};
use homehub_domain::time::Timestamp;

/// Repository for the `devices` table.
pub trait DeviceRepository {
    /// Insert a new device row.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HubError>> + Send;

    /// Get a device by id.
    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HubError>> + Send;

    /// List all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HubError>> + Send;

    /// Update `status` and `last_seen` on an existing row.
    ///
    /// Returns the number of rows affected — zero when the device id is
    /// unknown, which the hub uses to detect first contact.
    fn apply_status(
        &self,
        id: &DeviceId,
        status: &DeviceStatus,
        last_seen: Timestamp,
    ) -> impl Future<Output = Result<u64, HubError>> + Send;
}

/// Append-only store for the `device_logs` table.
pub trait DeviceLogStore {
    /// Append one log row. Rows are never mutated or deleted.
    fn append(
        &self,
        entry: DeviceLogEntry,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Most recent log rows for a device, newest-first.
    fn find_by_device(
        &self,
        id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DeviceLogEntry>, HubError>> + Send;
}

/// Append-only store for the `energy_consumption` table.
pub trait EnergyStore {
    /// Append one power sample.
    fn append(&self, sample: EnergySample) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Average and peak power per device for the given calendar day.
    fn summary_for_day(
        &self,
        day: chrono::NaiveDate,
    ) -> impl Future<Output = Result<Vec<EnergySummaryRow>, HubError>> + Send;
}

/// Append-only store for the `security_events` table.
pub trait SecurityEventStore {
    /// Append one derived security event.
    fn append(&self, event: SecurityEvent) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Most recent events, newest-first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SecurityEvent>, HubError>> + Send;
}
