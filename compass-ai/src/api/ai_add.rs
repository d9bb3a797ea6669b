//! AI add-person handlers
//!
//! Both transports run the same [`Pipeline`](crate::services::Pipeline);
//! only the progress sink differs.

use axum::{
    body::Bytes,
    extract::State,
    response::sse::{Event, Sse},
    Json,
};
use compass_common::events::{PersonPayload, StreamEvent};
use compass_common::sse::sse_from_events;
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::ApiResult;
use crate::services::{ChannelSink, CollectingSink, PipelineError};
use crate::AppState;

/// Add request body: `{"name": "..."}`
#[derive(Debug, Deserialize)]
pub struct AddPersonRequest {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
}

/// Extract the requested name from a JSON body
///
/// The content type is not checked. Unparsable bodies and non-string names
/// become an empty name, which the pipeline rejects as "Name is required".
fn requested_name(body: &[u8]) -> String {
    match serde_json::from_slice::<AddPersonRequest>(body) {
        Ok(request) => request
            .name
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            tracing::debug!("Rejected add request body: {}", e);
            String::new()
        }
    }
}

/// POST /api/people/ai-add
///
/// Single JSON response once the run is over.
pub async fn ai_add(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<PersonPayload>> {
    let name = requested_name(&body);
    let sink = CollectingSink::new();
    let cancel = CancellationToken::new();

    match state.pipeline.run(&name, &sink, &cancel).await {
        Ok(person) => Ok(Json(PersonPayload::from(&person))),
        Err(e) => {
            if !e.is_client_error() {
                state.record_error(&e).await;
            }
            Err(e.into())
        }
    }
}

/// POST /api/people/ai-add-stream
///
/// Streams progress as SSE `data:` frames and ends with one error or success
/// frame. Dropping the response (client disconnect) cancels the run.
pub async fn ai_add_stream(
    State(state): State<AppState>,
    body: Bytes,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let name = requested_name(&body);
    let (tx, mut rx) = mpsc::unbounded_channel::<StreamEvent>();
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    tokio::spawn(async move {
        let sink = ChannelSink::new(tx.clone(), cancel.clone());

        let final_event = match state.pipeline.run(&name, &sink, &cancel).await {
            Ok(person) => StreamEvent::success(PersonPayload::from(&person)),
            Err(PipelineError::Cancelled) => return,
            Err(e) => {
                if !e.is_client_error() {
                    state.record_error(&e).await;
                }
                StreamEvent::error(e.public_message())
            }
        };

        if tx.send(final_event).is_err() {
            tracing::debug!("Stream closed before final event");
        }
    });

    let events = async_stream::stream! {
        let _guard = guard;
        while let Some(event) = rx.recv().await {
            let terminal = event.is_terminal();
            yield event;
            if terminal {
                break;
            }
        }
    };

    sse_from_events(events)
}
