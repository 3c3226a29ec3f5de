//! Notifier port — fan-out of hub-originated events to live observers.

use std::future::Future;
use std::sync::Arc;

use homehub_domain::error::HubError;
use homehub_domain::notification::Notification;

/// Delivers a notification to every currently connected observer.
///
/// Must be non-blocking (or bounded-latency) relative to ingestion:
/// observer connects and disconnects never stall the hub.
pub trait Notifier {
    /// Broadcast a notification to all current observers.
    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for Arc<T> {
    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).notify(notification)
    }
}
