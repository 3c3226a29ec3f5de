//! Bus ports — outbound publishes and the inbound message handler.

use std::future::Future;
use std::sync::Arc;

use homehub_domain::error::HubError;

/// Accepts outbound `(topic, raw-bytes)` publishes onto the bus.
///
/// Implementations must be safe to invoke concurrently from multiple
/// dispatchers. Delivery guarantees are whatever the underlying transport
/// provides; no receipt confirmation is surfaced.
pub trait CommandPublisher {
    /// Publish a serialized command to a topic.
    ///
    /// Fails with [`HubError::Publish`] when the transport cannot accept
    /// the publish (e.g. not connected).
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: CommandPublisher + Send + Sync> CommandPublisher for Arc<T> {
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).publish(topic, payload)
    }
}

/// Receives inbound `(topic, raw-bytes)` messages from the bus gateway.
///
/// The gateway performs no business logic: it forwards every delivery here
/// synchronously and in order. The hub implements this trait, making the
/// dependency direction explicit instead of registering free-floating
/// closures on the transport.
pub trait MessageHandler {
    /// Handle one inbound message to completion. Not cancellable mid-flight.
    fn handle(
        &self,
        topic: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: MessageHandler + Send + Sync> MessageHandler for Arc<T> {
    fn handle(
        &self,
        topic: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).handle(topic, payload)
    }
}
