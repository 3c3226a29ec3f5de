//! In-process observer fan-out backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use homehub_domain::error::HubError;
use homehub_domain::notification::Notification;

use crate::ports::Notifier;

/// In-process fan-out using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active observers (the
/// notification is simply dropped), and a slow observer lags without
/// blocking the publisher.
pub struct Broadcaster {
    sender: broadcast::Sender<Notification>,
}

impl Broadcaster {
    /// Create a new broadcaster with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications.
    ///
    /// Returns a receiver that will get all notifications published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for Broadcaster {
    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(notification);
        async { Ok(()) }
    }
}
