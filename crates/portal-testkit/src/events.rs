//! Recording event sink

use parking_lot::Mutex;
use portal_core::{EventError, EventKind, EventPayload, EventSink, PortalEvent};

/// Owned copy of a delivered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Event name
    pub kind: EventKind,
    /// Publishing service
    pub source: String,
    /// Page reference or navigation scope key of the payload
    pub subject: String,
}

#[derive(Debug, Default)]
struct SinkState {
    delivered: Vec<RecordedEvent>,
    attempts: usize,
    failing: Option<String>,
}

/// Sink that records deliveries and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    state: Mutex<SinkState>,
}

impl RecordingEventSink {
    /// Create a sink that accepts every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that rejects every event with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let sink = Self::new();
        sink.state.lock().failing = Some(message.into());
        sink
    }

    /// Events delivered so far, in order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.state.lock().delivered.clone()
    }

    /// Names of the events delivered so far, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.state.lock().delivered.iter().map(|e| e.kind).collect()
    }

    /// Number of publish calls, delivered or not.
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: &PortalEvent<'_>) -> Result<(), EventError> {
        let mut state = self.state.lock();
        state.attempts += 1;
        if let Some(message) = &state.failing {
            tracing::debug!(event = %event.kind, reason = %message, "rejecting event");
            return Err(EventError::Delivery {
                event: event.kind,
                message: message.clone(),
            });
        }
        let subject = match event.payload {
            EventPayload::Page(page) => page.page_id().to_string(),
            EventPayload::Navigation(navigation) => navigation.key().to_string(),
        };
        state.delivered.push(RecordedEvent {
            kind: event.kind,
            source: event.source.to_string(),
            subject,
        });
        Ok(())
    }
}
