//! Event types for the add-person pipeline
//!
//! The streaming transport writes one `StreamEvent` per SSE `data:` line.
//! Payload shapes are mutually exclusive:
//!
//! ```text
//! {"error": "<message>"}
//! {"progress": {"current": 3, "total": 64, "message": "Processing question 2 of 61"}}
//! {"success": true, "person": {"name": "...", "x": 1.5, "y": -2.0, "wikipedia_url": null}}
//! ```

use serde::{Deserialize, Serialize};

/// One step of a long-running pipeline run
///
/// Emitted in strictly increasing `current` order and never retained after
/// delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Step index, starting at 0
    pub current: u32,
    /// Total number of steps for this run
    pub total: u32,
    /// Human readable description of the step
    pub message: String,
}

impl ProgressEvent {
    pub fn new(current: u32, total: u32, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }
}

/// Person as sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPayload {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Canonical reference URL, `null` when unresolved
    pub wikipedia_url: Option<String>,
}

/// Event written to the streaming transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamEvent {
    /// Terminal failure; the stream closes after this event
    Error { error: String },

    /// Intermediate progress
    Progress { progress: ProgressEvent },

    /// Terminal success carrying the persisted person
    Success { success: bool, person: PersonPayload },
}

impl StreamEvent {
    pub fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error {
            error: message.into(),
        }
    }

    pub fn progress(event: ProgressEvent) -> Self {
        StreamEvent::Progress { progress: event }
    }

    pub fn success(person: PersonPayload) -> Self {
        StreamEvent::Success {
            success: true,
            person,
        }
    }

    /// Short event name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            StreamEvent::Error { .. } => "Error",
            StreamEvent::Progress { .. } => "Progress",
            StreamEvent::Success { .. } => "Success",
        }
    }

    /// Whether the stream ends after this event
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Progress { .. })
    }
}
