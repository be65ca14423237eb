// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable event values exchanged through the registry

use crate::id::{ComponentId, EventId};

/// Typed event payload.
///
/// A registry is generic over one payload type, usually an enum with one
/// variant per event kind. The variant determines the event name.
pub trait Payload: std::fmt::Debug + Send + Sync + 'static {
    /// Event name used for logging and topic matching (e.g. "payment_confirmed")
    fn name(&self) -> &str;
}

/// An event in flight.
///
/// Fields are private: once constructed an event is never mutated, and
/// during dispatch it is shared between recipients behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Event<P> {
    id: EventId,
    caused_by: Option<EventId>,
    sender: ComponentId,
    payload: P,
}

impl<P: Payload> Event<P> {
    pub fn new(sender: impl Into<ComponentId>, payload: P) -> Self {
        Self {
            id: EventId::generate(),
            caused_by: None,
            sender: sender.into(),
            payload,
        }
    }

    /// Link this event to the event whose handling produced it
    pub(crate) fn with_cause(mut self, cause: EventId) -> Self {
        self.caused_by = Some(cause);
        self
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// The event being handled when this one was emitted, if any
    pub fn caused_by(&self) -> Option<&EventId> {
        self.caused_by.as_ref()
    }

    pub fn sender(&self) -> &ComponentId {
        &self.sender
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn name(&self) -> &str {
        self.payload.name()
    }

    /// Payload-free description for logs and failure reports
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            name: self.name().to_string(),
            sender: self.sender.clone(),
        }
    }
}

/// Identity of an event without its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub sender: ComponentId,
}

impl std::fmt::Display for EventSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} from {} ({})", self.name, self.sender, self.id)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
