//! Server-Sent Events (SSE) stream for real-time notifications.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use homehub_app::ports::{
    CommandPublisher, CommandTranslator, DeviceLogStore, DeviceRepository, EnergyStore, Notifier,
    SecurityEventStore,
};

use crate::state::AppState;

/// `GET /api/events/stream` — SSE stream of live hub notifications.
///
/// Subscribes to the notification broadcast channel and sends each
/// notification as a JSON-encoded SSE frame, with the notification's
/// event name as the SSE event type. The stream continues until the
/// client disconnects.
pub async fn stream<DR, LS, ES, SS, CP, NP, CT>(
    State(state): State<AppState<DR, LS, ES, SS, CP, NP, CT>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: DeviceLogStore + Send + Sync + 'static,
    ES: EnergyStore + Send + Sync + 'static,
    SS: SecurityEventStore + Send + Sync + 'static,
    CP: CommandPublisher + Send + Sync + 'static,
    NP: Notifier + Send + Sync + 'static,
    CT: CommandTranslator + Send + Sync + 'static,
{
    let receiver = state.events.subscribe();
    let event_stream = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(notification) => match serde_json::to_string(&notification) {
            Ok(json) => Some(Ok(Event::default()
                .event(notification.event_name())
                .data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize notification for SSE stream");
                None
            }
        },
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some notifications were dropped"
            );
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
