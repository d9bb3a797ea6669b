//! Progress reporting for pipeline runs
//!
//! The pipeline pushes [`ProgressEvent`]s into a [`ProgressSink`] and does not
//! know which transport is listening. The streaming endpoint uses
//! [`ChannelSink`]; the buffered endpoint uses [`CollectingSink`].

use compass_common::events::{ProgressEvent, StreamEvent};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Steps outside the per-question loop: existence check, notability,
/// reference lookup, persist
pub const FIXED_OVERHEAD_STEPS: u32 = 3;

/// Ordered event channel the pipeline reports into
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Pushes progress into a streaming response
///
/// If the receiving side is gone (client disconnected) the run's
/// cancellation token is triggered.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StreamEvent>,
    cancel: CancellationToken,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<StreamEvent>, cancel: CancellationToken) -> Self {
        Self { tx, cancel }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        if self.cancel.is_cancelled() {
            return;
        }
        if self.tx.send(StreamEvent::progress(event)).is_err() {
            tracing::debug!("Progress receiver dropped, cancelling run");
            self.cancel.cancel();
        }
    }
}

/// Keeps every event in memory; used where only the final result is sent
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events emitted so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressSink for CollectingSink {
    fn emit(&self, event: ProgressEvent) {
        tracing::trace!(current = event.current, total = event.total, "{}", event.message);
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Numbers steps for one run so `current` strictly increases
pub struct ProgressReporter<'a> {
    sink: &'a dyn ProgressSink,
    total: u32,
    next: u32,
}

impl<'a> ProgressReporter<'a> {
    /// Reporter for a run over `question_count` questions
    pub fn new(sink: &'a dyn ProgressSink, question_count: usize) -> Self {
        let questions = u32::try_from(question_count).unwrap_or(u32::MAX - FIXED_OVERHEAD_STEPS);
        Self {
            sink,
            total: questions + FIXED_OVERHEAD_STEPS,
            next: 0,
        }
    }

    /// Emit the next step
    pub fn step(&mut self, message: impl Into<String>) {
        self.sink
            .emit(ProgressEvent::new(self.next, self.total, message));
        self.next += 1;
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_numbers_steps() {
        let sink = CollectingSink::new();
        let mut reporter = ProgressReporter::new(&sink, 2);
        assert_eq!(reporter.total(), 5);

        reporter.step("a");
        reporter.step("b");
        reporter.step("c");

        let events = sink.events();
        let currents: Vec<u32> = events.iter().map(|e| e.current).collect();
        assert_eq!(currents, vec![0, 1, 2]);
        assert!(events.iter().all(|e| e.total == 5));
        assert_eq!(events[1].message, "b");
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_progress() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let sink = ChannelSink::new(tx, cancel.clone());

        sink.emit(ProgressEvent::new(0, 3, "start"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, StreamEvent::progress(ProgressEvent::new(0, 3, "start")));
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn test_channel_sink_cancels_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let cancel = CancellationToken::new();
        let sink = ChannelSink::new(tx, cancel.clone());

        sink.emit(ProgressEvent::new(0, 3, "start"));
        assert!(cancel.is_cancelled());
    }
}
