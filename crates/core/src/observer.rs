// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observability hooks for dispatch outcomes

use crate::error::DispatchFailure;
use crate::event::EventSummary;
use crate::id::ComponentId;

/// Receives per-recipient dispatch outcomes.
///
/// Called from whichever thread or task ran the delivery.
pub trait DispatchObserver: Send + Sync {
    fn delivered(&self, _recipient: &ComponentId, _event: &EventSummary) {}

    fn failed(&self, failure: &DispatchFailure);
}

/// Logs failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn delivered(&self, recipient: &ComponentId, event: &EventSummary) {
        tracing::trace!(%recipient, event = %event.name, event_id = %event.id, "delivered");
    }

    fn failed(&self, failure: &DispatchFailure) {
        match failure {
            DispatchFailure::Recipient {
                recipient,
                event,
                error,
            } => tracing::warn!(
                %recipient,
                event = %event.name,
                event_id = %event.id,
                sender = %event.sender,
                error = %error,
                "recipient failed"
            ),
            DispatchFailure::UnknownRecipient { recipient, event } => tracing::warn!(
                %recipient,
                event = %event.name,
                event_id = %event.id,
                "policy selected unregistered recipient"
            ),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        deliveries: Vec<(ComponentId, EventSummary)>,
        failures: Vec<DispatchFailure>,
    }

    /// Observer that records every outcome for test assertions.
    ///
    /// Clones share the recording.
    #[derive(Clone, Default)]
    pub struct RecordingObserver {
        inner: Arc<Mutex<Recorded>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failures(&self) -> Vec<DispatchFailure> {
            self.inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .failures
                .clone()
        }

        pub fn deliveries(&self) -> Vec<(ComponentId, EventSummary)> {
            self.inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .deliveries
                .clone()
        }

        /// Recipients that successfully handled events with this name
        pub fn delivered_to(&self, event_name: &str) -> Vec<ComponentId> {
            self.deliveries()
                .into_iter()
                .filter(|(_, event)| event.name == event_name)
                .map(|(recipient, _)| recipient)
                .collect()
        }
    }

    impl DispatchObserver for RecordingObserver {
        fn delivered(&self, recipient: &ComponentId, event: &EventSummary) {
            self.inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .deliveries
                .push((recipient.clone(), event.clone()));
        }

        fn failed(&self, failure: &DispatchFailure) {
            self.inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .failures
                .push(failure.clone());
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingObserver;
