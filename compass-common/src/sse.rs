//! Server-Sent Events (SSE) utilities
//!
//! Each pipeline event becomes a single `data: <JSON>\n\n` frame.

use crate::events::StreamEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, warn};

/// Keep-alive comment interval for idle streams
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Convert a pipeline event into an SSE frame
///
/// Serialization of these types cannot fail in practice; if it ever does the
/// client receives a generic error frame instead of a broken line.
pub fn to_sse_event(event: &StreamEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(json) => {
            debug!("SSE: Sending {} event", event.event_type());
            Event::default().data(json)
        }
        Err(e) => {
            warn!("SSE: Failed to serialize {} event: {}", event.event_type(), e);
            Event::default().data(r#"{"error":"An error occurred while processing your request"}"#)
        }
    }
}

/// Wrap a stream of pipeline events into an SSE response
///
/// Idle periods (long model calls) are covered by keep-alive comments, which
/// SSE clients ignore.
pub fn sse_from_events<S>(events: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let stream = events.map(|event| Ok::<_, Infallible>(to_sse_event(&event)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
