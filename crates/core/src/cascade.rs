// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handle a recipient uses to emit follow-up events

use crate::error::{DispatchError, ReceiveError};
use crate::event::{Event, EventSummary, Payload};
use crate::id::ComponentId;
use crate::registry::{Dispatched, Registry};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Delivery context passed to [`Component::receive`](crate::Component::receive).
///
/// Events sent through it carry the recipient as sender, link back to the
/// event being handled, and count one level deeper toward the registry's
/// cascade limit. Cheap to clone, so it can move into spawned work.
pub struct Cascade<P: Payload> {
    registry: Registry<P>,
    recipient: ComponentId,
    cause: EventSummary,
    depth: u32,
}

impl<P: Payload> Cascade<P> {
    pub(crate) fn new(
        registry: Registry<P>,
        recipient: ComponentId,
        cause: EventSummary,
        depth: u32,
    ) -> Self {
        Self {
            registry,
            recipient,
            cause,
            depth,
        }
    }

    /// The component this delivery is for
    pub fn recipient(&self) -> &ComponentId {
        &self.recipient
    }

    /// The event being handled
    pub fn cause(&self) -> &EventSummary {
        &self.cause
    }

    /// Cascade depth of the event being handled (0 for a top-level notify)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn registry(&self) -> &Registry<P> {
        &self.registry
    }

    /// Emit a follow-up event from the recipient
    pub fn notify(&self, payload: P) -> Result<Dispatched, DispatchError> {
        let event = Event::new(self.recipient.clone(), payload).with_cause(self.cause.id.clone());
        self.registry.dispatch_at(event, self.depth + 1)
    }

    /// Token cancelled when the registry shuts down
    pub fn cancellation(&self) -> CancellationToken {
        self.registry.cancellation()
    }

    /// Run slow work as a tracked task.
    ///
    /// The registry's `wait_idle` covers the task, and an `Err` or panic is
    /// reported to the observer as a failure of this recipient.
    pub fn spawn<F>(&self, work: F) -> Result<(), DispatchError>
    where
        F: Future<Output = Result<(), ReceiveError>> + Send + 'static,
    {
        self.registry
            .spawn_tracked(self.recipient.clone(), self.cause.clone(), work)
    }
}

impl<P: Payload> Clone for Cascade<P> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            recipient: self.recipient.clone(),
            cause: self.cause.clone(),
            depth: self.depth,
        }
    }
}
