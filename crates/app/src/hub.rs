//! The Device State Hub — the single owner of canonical in-memory device
//! state and the ingestion/classification/dispatch logic.
//!
//! Three independent call sources reach this type concurrently: the bus
//! gateway's delivery path, direct HTTP control calls, and batch dispatch
//! from natural-language processing. The in-memory maps sit behind
//! exclusive locks that are never held across an `.await`, so a reader can
//! never observe a partially-written payload and ingestion never blocks on
//! storage or the bus.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use homehub_domain::command::{ActionFailure, BatchOutcome, DeviceAction, DeviceSummary};
use homehub_domain::device::{Device, DeviceId, DeviceStatus};
use homehub_domain::error::{HubError, NotFoundError};
use homehub_domain::notification::Notification;
use homehub_domain::payload::Payload;
use homehub_domain::record::{
    DeviceLogEntry, EnergySample, EnergySummaryRow, LogAction, SecurityEvent,
};
use homehub_domain::time::{now, today};
use homehub_domain::topic::{self, TopicClass};

use crate::ports::{
    CommandPublisher, DeviceLogStore, DeviceRepository, EnergyStore, MessageHandler, Notifier,
    SecurityEventStore,
};

/// Canonical device-state owner. Generic over its ports to avoid dynamic
/// dispatch, in the same way the HTTP state is.
pub struct Hub<DR, LS, ES, SS, CP, NP> {
    devices: DR,
    logs: LS,
    energy: ES,
    security: SS,
    publisher: CP,
    notifier: NP,
    topic_prefix: String,
    latest_status: RwLock<HashMap<DeviceId, Payload>>,
    latest_sensor: RwLock<HashMap<DeviceId, Payload>>,
}

impl<DR, LS, ES, SS, CP, NP> Hub<DR, LS, ES, SS, CP, NP>
where
    DR: DeviceRepository + Send + Sync,
    LS: DeviceLogStore + Send + Sync,
    ES: EnergyStore + Send + Sync,
    SS: SecurityEventStore + Send + Sync,
    CP: CommandPublisher + Send + Sync,
    NP: Notifier + Send + Sync,
{
    /// Create a hub wired to the given ports. `topic_prefix` is the first
    /// segment of every bus topic (e.g. `home`).
    pub fn new(
        devices: DR,
        logs: LS,
        energy: ES,
        security: SS,
        publisher: CP,
        notifier: NP,
        topic_prefix: impl Into<String>,
    ) -> Self {
        Self {
            devices,
            logs,
            energy,
            security,
            publisher,
            notifier,
            topic_prefix: topic_prefix.into(),
            latest_status: RwLock::new(HashMap::new()),
            latest_sensor: RwLock::new(HashMap::new()),
        }
    }

    /// Process one inbound bus message to completion.
    ///
    /// Classification is substring based in fixed priority order
    /// (status > sensor > energy). An empty device id short-circuits every
    /// branch as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::MalformedPayload`] when the payload is not a
    /// JSON object, [`HubError::UnroutableTopic`] when the topic matches no
    /// recognized shape or lacks a device segment, or a storage error.
    #[tracing::instrument(skip(self, raw), fields(topic = %topic))]
    pub async fn ingest(&self, topic: &str, raw: &[u8]) -> Result<(), HubError> {
        let payload: Payload =
            serde_json::from_slice(raw).map_err(HubError::MalformedPayload)?;
        let class = topic::classify(topic)
            .ok_or_else(|| HubError::UnroutableTopic(topic.to_owned()))?;
        let device_id = topic::device_id(topic)
            .ok_or_else(|| HubError::UnroutableTopic(topic.to_owned()))?;
        if device_id.is_empty() {
            return Ok(());
        }

        match class {
            TopicClass::Status => self.ingest_status(device_id, payload).await,
            TopicClass::Sensor => self.ingest_sensor(device_id, payload).await,
            TopicClass::Energy => self.ingest_energy(device_id, &payload).await,
        }
    }

    async fn ingest_status(&self, id: DeviceId, payload: Payload) -> Result<(), HubError> {
        replace(&self.latest_status, &id, &payload);

        let status = payload
            .status()
            .map_or(DeviceStatus::Online, DeviceStatus::from);
        let seen_at = now();

        let affected = self.devices.apply_status(&id, &status, seen_at).await?;
        if affected == 0 {
            // First contact from a device that was never provisioned:
            // create a minimal row so the device table, the log, and the
            // broadcast stay consistent.
            tracing::info!(device = %id, "auto-provisioning unknown device");
            self.devices
                .create(Device::auto_provisioned(id.clone()))
                .await?;
            self.devices.apply_status(&id, &status, seen_at).await?;
        }

        self.logs
            .append(DeviceLogEntry {
                device_id: id.clone(),
                action: LogAction::StatusUpdate,
                value: payload.to_value().to_string(),
                timestamp: seen_at,
            })
            .await?;

        self.notifier
            .notify(Notification::DeviceUpdate {
                device_id: id,
                data: payload,
            })
            .await?;
        Ok(())
    }

    async fn ingest_sensor(&self, id: DeviceId, payload: Payload) -> Result<(), HubError> {
        replace(&self.latest_sensor, &id, &payload);

        // Sensor messages are not written to the device log; only a
        // recognized trigger condition leaves a persisted trace.
        if payload.motion_detected() {
            let timestamp = now();
            self.security
                .append(SecurityEvent::motion(id.clone(), timestamp))
                .await?;
            self.notifier
                .notify(Notification::SecurityAlert {
                    sensor_id: id,
                    event: SecurityEvent::MOTION_DETECTED.to_owned(),
                    timestamp,
                })
                .await?;
        }
        Ok(())
    }

    async fn ingest_energy(&self, id: DeviceId, payload: &Payload) -> Result<(), HubError> {
        let Some(power_watts) = payload.power_watts() else {
            // Accepted but produces no row.
            return Ok(());
        };
        if power_watts < 0.0 {
            tracing::warn!(device = %id, power_watts, "discarding negative power reading");
            return Ok(());
        }
        self.energy
            .append(EnergySample {
                device_id: id,
                power_watts,
                timestamp: now(),
            })
            .await
    }

    /// Publish a command to the device's control topic, then log it.
    ///
    /// Publish-then-log is a guarantee: a command only appears in the
    /// device log if the gateway accepted the publish.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Publish`] when the gateway cannot accept the
    /// publish, or a storage error from the log append.
    #[tracing::instrument(skip(self, command), fields(device = %device_id))]
    pub async fn dispatch(
        &self,
        device_id: &DeviceId,
        command: &serde_json::Value,
    ) -> Result<(), HubError> {
        let topic = topic::control_topic(&self.topic_prefix, device_id);
        let body = serde_json::to_vec(command).map_err(HubError::MalformedPayload)?;
        self.publisher.publish(&topic, body).await?;

        self.logs
            .append(DeviceLogEntry {
                device_id: device_id.clone(),
                action: LogAction::ControlCommand,
                value: command.to_string(),
                timestamp: now(),
            })
            .await
    }

    /// Dispatch a list of actions, attempting every one.
    ///
    /// A failure on one action never aborts the rest: failures are
    /// collected per action and returned alongside the executed count.
    /// Cancellation (dropping the future) can only happen between actions,
    /// never mid-action.
    pub async fn dispatch_batch(&self, actions: &[DeviceAction]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for action in actions {
            match self.dispatch(&action.device_id, &action.command).await {
                Ok(()) => outcome.executed += 1,
                Err(err) => {
                    tracing::warn!(device = %action.device_id, error = %err, "batch action failed");
                    outcome.failures.push(ActionFailure {
                        device_id: action.device_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// The most recently accepted status payload for a device, if any.
    #[must_use]
    pub fn latest_status(&self, id: &DeviceId) -> Option<Payload> {
        read(&self.latest_status, id)
    }

    /// The most recently accepted sensor payload for a device, if any.
    #[must_use]
    pub fn latest_sensor(&self, id: &DeviceId) -> Option<Payload> {
        read(&self.latest_sensor, id)
    }

    /// List all persisted devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, HubError> {
        self.devices.get_all().await
    }

    /// Look up one device, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no device with `id` exists, or a
    /// storage error from the repository.
    pub async fn device(&self, id: &DeviceId) -> Result<Device, HubError> {
        self.devices.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Identity snapshot of every device, used as translator context.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn device_summaries(&self) -> Result<Vec<DeviceSummary>, HubError> {
        let devices = self.devices.get_all().await?;
        Ok(devices
            .into_iter()
            .map(|d| DeviceSummary {
                id: d.id,
                name: d.name,
                kind: d.kind,
                room: d.room,
            })
            .collect())
    }

    /// Most recent log rows for a device, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log store.
    pub async fn device_logs(
        &self,
        id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<DeviceLogEntry>, HubError> {
        self.logs.find_by_device(id, limit).await
    }

    /// Average and peak power per device for the current UTC day.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the energy store.
    pub async fn energy_summary_today(&self) -> Result<Vec<EnergySummaryRow>, HubError> {
        self.energy.summary_for_day(today()).await
    }

    /// Most recent security events, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the event store.
    pub async fn recent_security_events(
        &self,
        limit: usize,
    ) -> Result<Vec<SecurityEvent>, HubError> {
        self.security.recent(limit).await
    }
}

impl<DR, LS, ES, SS, CP, NP> MessageHandler for Hub<DR, LS, ES, SS, CP, NP>
where
    DR: DeviceRepository + Send + Sync,
    LS: DeviceLogStore + Send + Sync,
    ES: EnergyStore + Send + Sync,
    SS: SecurityEventStore + Send + Sync,
    CP: CommandPublisher + Send + Sync,
    NP: Notifier + Send + Sync,
{
    async fn handle(&self, topic: &str, payload: &[u8]) -> Result<(), HubError> {
        self.ingest(topic, payload).await
    }
}

/// Full-replace (not merge) of a cache entry. The guard never crosses an
/// await point; a poisoned lock still holds a fully-written map, so we
/// keep going with the inner value.
fn replace(cache: &RwLock<HashMap<DeviceId, Payload>>, id: &DeviceId, payload: &Payload) {
    let mut map = cache.write().unwrap_or_else(PoisonError::into_inner);
    map.insert(id.clone(), payload.clone());
}

fn read(cache: &RwLock<HashMap<DeviceId, Payload>>, id: &DeviceId) -> Option<Payload> {
    let map = cache.read().unwrap_or_else(PoisonError::into_inner);
    map.get(id).cloned()
}
