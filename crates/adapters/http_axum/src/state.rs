//! Shared application state for axum handlers.

use std::sync::Arc;

use homehub_app::assistant::Assistant;
use homehub_app::event_bus::Broadcaster;
use homehub_app::hub::Hub;
use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do
/// not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<DR, LS, ES, SS, CP, NP, CT> {
    /// The device state hub.
    pub hub: Arc<Hub<DR, LS, ES, SS, CP, NP>>,
    /// Natural-language command service; `None` when no translation
    /// service is configured.
    pub assistant: Option<Arc<Assistant<CT, DR, LS, ES, SS, CP, NP>>>,
    /// Notification fan-out consumed by the SSE endpoint.
    pub events: Arc<Broadcaster>,
}

impl<DR, LS, ES, SS, CP, NP, CT> Clone for AppState<DR, LS, ES, SS, CP, NP, CT> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
            assistant: self.assistant.as_ref().map(Arc::clone),
            events: Arc::clone(&self.events),
        }
    }
}

impl<DR, LS, ES, SS, CP, NP, CT> AppState<DR, LS, ES, SS, CP, NP, CT>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    /// Create state from pre-wrapped `Arc` handles.
    ///
    /// The hub is shared with the bus gateway task, so it always arrives
    /// here already wrapped.
    pub fn new(
        hub: Arc<Hub<DR, LS, ES, SS, CP, NP>>,
        assistant: Option<Arc<Assistant<CT, DR, LS, ES, SS, CP, NP>>>,
        events: Arc<Broadcaster>,
    ) -> Self {
        Self {
            hub,
            assistant,
            events,
        }
    }
}
