//! Assistant — the natural-language command surface.
//!
//! Accepts free text, hands it to the external translator together with a
//! snapshot of current device identities, then funnels the returned
//! actions through the hub's single dispatch entry point. The translation
//! call is the long-latency step and runs here, never under a hub lock.

use std::sync::Arc;

use serde::Serialize;

use homehub_domain::command::{ActionFailure, DeviceAction};
use homehub_domain::error::HubError;

use crate::hub::Hub;
use crate::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

/// What the caller gets back: the translator's human-readable response plus
/// the attempted action list and its per-action outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub actions: Vec<DeviceAction>,
    pub executed: usize,
    pub failures: Vec<ActionFailure>,
}

/// Natural-language command service.
pub struct Assistant<T, DR, LS, ES, SS, CP, NP> {
    translator: T,
    hub: Arc<Hub<DR, LS, ES, SS, CP, NP>>,
}

impl<T, DR, LS, ES, SS, CP, NP> Assistant<T, DR, LS, ES, SS, CP, NP>
where
    T: CommandTranslator + Send + Sync,
    DR: DeviceRepository + Send + Sync,
    LS: DeviceLogStore + Send + Sync,
    ES: EnergyStore + Send + Sync,
    SS: SecurityEventStore + Send + Sync,
    CP: CommandPublisher + Send + Sync,
    NP: Notifier + Send + Sync,
{
    /// Create an assistant backed by the given translator and hub.
    pub fn new(translator: T, hub: Arc<Hub<DR, LS, ES, SS, CP, NP>>) -> Self {
        Self { translator, hub }
    }

    /// Translate `input` and dispatch the resulting actions.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Translation`] when the translation call fails —
    /// in that case no action has been dispatched — or a storage error from
    /// the device snapshot.
    #[tracing::instrument(skip(self, input))]
    pub async fn handle(&self, input: &str) -> Result<AssistantReply, HubError> {
        let context = self.hub.device_summaries().await?;
        let translation = self.translator.translate(input, &context).await?;

        let outcome = self.hub.dispatch_batch(&translation.actions).await;
        tracing::info!(
            executed = outcome.executed,
            failed = outcome.failures.len(),
            "assistant command dispatched"
        );

        Ok(AssistantReply {
            response: translation.response,
            actions: translation.actions,
            executed: outcome.executed,
            failures: outcome.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use homehub_domain::command::{DeviceSummary, Translation};
    use homehub_domain::device::{Device, DeviceId, DeviceStatus};
    use homehub_domain::record::{DeviceLogEntry, EnergySample, EnergySummaryRow, SecurityEvent};
    use homehub_domain::notification::Notification;
    use homehub_domain::time::Timestamp;

    #[derive(Default)]
    struct StubStore {
        devices: Mutex<HashMap<DeviceId, Device>>,
    }

    impl DeviceRepository for Arc<StubStore> {
        async fn create(&self, device: Device) -> Result<Device, HubError> {
            self.devices
                .lock()
                .unwrap()
                .insert(device.id.clone(), device.clone());
            Ok(device)
        }
        async fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, HubError> {
            Ok(self.devices.lock().unwrap().get(id).cloned())
        }
        async fn get_all(&self) -> Result<Vec<Device>, HubError> {
            Ok(self.devices.lock().unwrap().values().cloned().collect())
        }
        async fn apply_status(
            &self,
            _id: &DeviceId,
            _status: &DeviceStatus,
            _last_seen: Timestamp,
        ) -> Result<u64, HubError> {
            Ok(1)
        }
    }

    impl DeviceLogStore for Arc<StubStore> {
        async fn append(&self, _entry: DeviceLogEntry) -> Result<(), HubError> {
            Ok(())
        }
        async fn find_by_device(
            &self,
            _id: &DeviceId,
            _limit: usize,
        ) -> Result<Vec<DeviceLogEntry>, HubError> {
            Ok(vec![])
        }
    }

    impl EnergyStore for Arc<StubStore> {
        async fn append(&self, _sample: EnergySample) -> Result<(), HubError> {
            Ok(())
        }
        async fn summary_for_day(
            &self,
            _day: chrono::NaiveDate,
        ) -> Result<Vec<EnergySummaryRow>, HubError> {
            Ok(vec![])
        }
    }

    impl SecurityEventStore for Arc<StubStore> {
        async fn append(&self, _event: SecurityEvent) -> Result<(), HubError> {
            Ok(())
        }
        async fn recent(&self, _limit: usize) -> Result<Vec<SecurityEvent>, HubError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct FlakyPublisher {
        down_for: Mutex<Vec<String>>,
        sent: Mutex<Vec<String>>,
    }

    impl CommandPublisher for Arc<FlakyPublisher> {
        async fn publish(&self, topic: &str, _payload: Vec<u8>) -> Result<(), HubError> {
            if self.down_for.lock().unwrap().iter().any(|t| t == topic) {
                return Err(HubError::Publish("gateway disconnected".to_owned()));
            }
            self.sent.lock().unwrap().push(topic.to_owned());
            Ok(())
        }
    }

    struct NullNotifier;

    impl Notifier for NullNotifier {
        async fn notify(&self, _notification: Notification) -> Result<(), HubError> {
            Ok(())
        }
    }

    struct ScriptedTranslator {
        translation: Translation,
        fail: AtomicBool,
        last_context: Mutex<Vec<DeviceSummary>>,
    }

    impl ScriptedTranslator {
        fn returning(translation: Translation) -> Self {
            Self {
                translation,
                fail: AtomicBool::new(false),
                last_context: Mutex::new(vec![]),
            }
        }
    }

    impl CommandTranslator for Arc<ScriptedTranslator> {
        async fn translate(
            &self,
            _input: &str,
            context: &[DeviceSummary],
        ) -> Result<Translation, HubError> {
            *self.last_context.lock().unwrap() = context.to_vec();
            if self.fail.load(Ordering::SeqCst) {
                return Err(HubError::Translation("service unreachable".to_owned()));
            }
            Ok(self.translation.clone())
        }
    }

    struct Harness {
        assistant: Assistant<
            Arc<ScriptedTranslator>,
            Arc<StubStore>,
            Arc<StubStore>,
            Arc<StubStore>,
            Arc<StubStore>,
            Arc<FlakyPublisher>,
            NullNotifier,
        >,
        translator: Arc<ScriptedTranslator>,
        publisher: Arc<FlakyPublisher>,
        store: Arc<StubStore>,
    }

    fn harness(translation: Translation) -> Harness {
        let store = Arc::new(StubStore::default());
        let publisher = Arc::new(FlakyPublisher::default());
        let translator = Arc::new(ScriptedTranslator::returning(translation));
        let hub = Arc::new(Hub::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&publisher),
            NullNotifier,
            "home",
        ));
        let assistant = Assistant::new(Arc::clone(&translator), hub);
        Harness {
            assistant,
            translator,
            publisher,
            store,
        }
    }

    fn two_actions() -> Translation {
        Translation {
            response: "Turning on the fan and the light".to_owned(),
            actions: vec![
                DeviceAction {
                    device_id: DeviceId::from("fan1"),
                    command: json!({"power": "on", "speed": 3}),
                },
                DeviceAction {
                    device_id: DeviceId::from("light1"),
                    command: json!({"power": "on"}),
                },
            ],
        }
    }

    #[tokio::test]
    async fn should_dispatch_all_translated_actions() {
        let h = harness(two_actions());

        let reply = h.assistant.handle("turn everything on").await.unwrap();

        assert_eq!(reply.executed, 2);
        assert!(reply.failures.is_empty());
        assert_eq!(reply.response, "Turning on the fan and the light");
        assert_eq!(reply.actions.len(), 2);
        let sent = h.publisher.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), ["home/fan1/control", "home/light1/control"]);
    }

    #[tokio::test]
    async fn should_report_partial_failure_without_aborting_batch() {
        let h = harness(two_actions());
        h.publisher
            .down_for
            .lock()
            .unwrap()
            .push("home/fan1/control".to_owned());

        let reply = h.assistant.handle("turn everything on").await.unwrap();

        assert_eq!(reply.executed, 1);
        assert_eq!(reply.failures.len(), 1);
        assert_eq!(reply.failures[0].device_id, DeviceId::from("fan1"));
    }

    #[tokio::test]
    async fn should_surface_translation_failure_without_dispatching() {
        let h = harness(two_actions());
        h.translator.fail.store(true, Ordering::SeqCst);

        let result = h.assistant.handle("turn everything on").await;

        assert!(matches!(result, Err(HubError::Translation(_))));
        assert!(h.publisher.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_pass_device_snapshot_as_context() {
        let h = harness(Translation {
            response: "Nothing to do".to_owned(),
            actions: vec![],
        });
        h.store
            .create(Device::auto_provisioned(DeviceId::from("light1")))
            .await
            .unwrap();

        h.assistant.handle("hello").await.unwrap();

        let context = h.translator.last_context.lock().unwrap();
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].id, DeviceId::from("light1"));
    }
}
