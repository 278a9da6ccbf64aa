//! Lifecycle event contract
//!
//! Events are published after the corresponding persist has completed.
//! Delivery is best effort: a sink error is reported to the publisher but
//! never undoes the persist.

use crate::model::navigation::NavigationTree;
use crate::model::page::Page;
use std::fmt;
use thiserror::Error;

/// Error type for event delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A listener rejected or failed to process the event
    #[error("delivery of {event} failed: {message}")]
    Delivery {
        /// Event that failed
        event: EventKind,
        /// Description of the failure
        message: String,
    },

    /// The sink no longer accepts events
    #[error("event sink closed")]
    Closed,
}

/// Stable lifecycle event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A page was created
    PageCreate,
    /// A page was updated
    PageUpdate,
    /// A page was removed
    PageRemove,
    /// A navigation tree was created
    NavigationCreate,
    /// A navigation tree was updated
    NavigationUpdate,
    /// A navigation tree was removed
    NavigationRemove,
}

impl EventKind {
    /// Stable identifier of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageCreate => "page.create",
            EventKind::PageUpdate => "page.update",
            EventKind::PageRemove => "page.remove",
            EventKind::NavigationCreate => "navigation.create",
            EventKind::NavigationUpdate => "navigation.update",
            EventKind::NavigationRemove => "navigation.remove",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object affected by an event.
#[derive(Debug, Clone, Copy)]
pub enum EventPayload<'a> {
    /// Affected page
    Page(&'a Page),
    /// Affected navigation tree
    Navigation(&'a NavigationTree),
}

/// Lifecycle event as handed to the sink.
#[derive(Debug, Clone, Copy)]
pub struct PortalEvent<'a> {
    /// Event name
    pub kind: EventKind,
    /// Identifier of the publishing service
    pub source: &'a str,
    /// Affected object
    pub payload: EventPayload<'a>,
}

/// Fire-and-forget event delivery.
pub trait EventSink: Send + Sync {
    /// Deliver `event` to interested listeners.
    fn publish(&self, event: &PortalEvent<'_>) -> Result<(), EventError>;
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: &PortalEvent<'_>) -> Result<(), EventError> {
        Ok(())
    }
}
