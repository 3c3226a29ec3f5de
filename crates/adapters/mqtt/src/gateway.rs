//! Broker connection, inbound message pump and outbound publisher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};

use homehub_app::ports::{CommandPublisher, MessageHandler, Notifier};
use homehub_domain::error::HubError;
use homehub_domain::notification::Notification;
use homehub_domain::topic;

use crate::config::MqttConfig;

const KEEP_ALIVE: Duration = Duration::from_secs(30);
const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const CHANNEL_CAPACITY: usize = 100;

/// Owns the broker event loop.
///
/// Created once at startup; [`Gateway::run`] consumes it and loops until
/// the process shuts down. Outbound publishes go through the
/// [`CommandSender`] handed out by [`Gateway::sender`], which stays valid
/// across reconnects.
pub struct Gateway {
    client: AsyncClient,
    event_loop: EventLoop,
    connected: Arc<AtomicBool>,
    topic_prefix: String,
}

impl Gateway {
    /// Build a gateway from configuration. Does not connect yet; the
    /// connection is established when [`Gateway::run`] starts polling.
    #[must_use]
    pub fn new(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, event_loop) = AsyncClient::new(options, CHANNEL_CAPACITY);

        Self {
            client,
            event_loop,
            connected: Arc::new(AtomicBool::new(false)),
            topic_prefix: config.topic_prefix.clone(),
        }
    }

    /// A cloneable handle for publishing commands from other tasks.
    #[must_use]
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            client: self.client.clone(),
            connected: Arc::clone(&self.connected),
        }
    }

    /// Drive the broker connection forever.
    ///
    /// Every inbound publish is forwarded to `handler` in arrival order;
    /// handler failures are logged and the message dropped, never fatal.
    /// Connectivity transitions are pushed through `notifier` so observers
    /// can reflect the bus state.
    pub async fn run<H, N>(mut self, handler: H, notifier: N)
    where
        H: MessageHandler + Send + Sync,
        N: Notifier + Send + Sync,
    {
        tracing::info!(prefix = %self.topic_prefix, "starting bus gateway");

        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!("connected to broker");
                    self.connected.store(true, Ordering::SeqCst);
                    Self::subscribe_all(&self.client, &self.topic_prefix).await;
                    notify_connectivity(&notifier, true).await;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    tracing::debug!(topic = %publish.topic, bytes = publish.payload.len(), "inbound message");
                    if let Err(err) = handler.handle(&publish.topic, &publish.payload).await {
                        tracing::warn!(topic = %publish.topic, error = %err, "dropping inbound message");
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(error = %err, "broker connection error");
                    if self.connected.swap(false, Ordering::SeqCst) {
                        notify_connectivity(&notifier, false).await;
                    }
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }

    async fn subscribe_all(client: &AsyncClient, topic_prefix: &str) {
        for filter in topic::subscription_filters(topic_prefix) {
            if let Err(err) = client.subscribe(&filter, QoS::AtMostOnce).await {
                tracing::error!(filter = %filter, error = %err, "subscribe failed");
            }
        }
    }
}

async fn notify_connectivity<N: Notifier>(notifier: &N, connected: bool) {
    let notification = Notification::BusConnectivity { connected };
    if let Err(err) = notifier.notify(notification).await {
        tracing::warn!(error = %err, "failed to broadcast connectivity change");
    }
}

/// Publishes commands onto the bus. Cheap to clone and share.
#[derive(Clone)]
pub struct CommandSender {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
}

impl CommandPublisher for CommandSender {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), HubError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(HubError::Publish("broker not connected".to_string()));
        }

        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|err| HubError::Publish(err.to_string()))
    }
}
