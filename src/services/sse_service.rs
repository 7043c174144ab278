use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::{
    dto::sse::{Handshake, ServerEvent},
    state::{SharedState, SseHub},
};

const EVENT_HANDSHAKE: &str = "handshake";
const EVENT_INFO: &str = "info";

/// Subscribe to the page stream; the first event tells the page what is in flight.
pub fn subscribe(state: &SharedState) -> (broadcast::Receiver<ServerEvent>, ServerEvent) {
    let receiver = state.public_sse().subscribe();
    let handshake = Handshake {
        message: "connected".into(),
        drawing: state.draw_gate().is_busy(),
        spinning: state.spin_gate().is_busy(),
        degraded: state.is_degraded(),
    };
    let first = ServerEvent::json(Some(EVENT_HANDSHAKE.to_string()), &handshake).unwrap_or_else(
        |err| {
            warn!(error = %err, "failed to serialize SSE handshake");
            ServerEvent::new(Some(EVENT_INFO.to_string()), "connected".into())
        },
    );
    info!(
        subscribers = state.public_sse().subscriber_count(),
        "SSE stream connected"
    );
    (receiver, first)
}

/// Convert a broadcast receiver into an SSE response, sending `first` before any
/// broadcast event and stopping once the client disconnects.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<ServerEvent>,
    first: ServerEvent,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(16);

    tokio::spawn(async move {
        if tx.send(Ok(to_event(first))).await.is_err() {
            return;
        }

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            if tx.send(Ok(to_event(payload))).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            // The page re-syncs from the next snapshot event.
                            debug!(skipped, "SSE subscriber lagged");
                            continue;
                        }
                    }
                }
            }
        }

        info!("SSE stream disconnected");
    });

    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn to_event(payload: ServerEvent) -> Event {
    let event = match payload.event {
        Some(name) => Event::default().event(name),
        None => Event::default(),
    };
    event.data(payload.data)
}

/// Send a human-readable info message onto the stream.
pub fn broadcast_info(hub: &SseHub, message: &str) {
    hub.broadcast(ServerEvent::new(
        Some(EVENT_INFO.to_string()),
        message.to_string(),
    ));
}
