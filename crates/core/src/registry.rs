// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The mediator: membership and dispatch

use crate::cascade::Cascade;
use crate::component::Component;
use crate::config::{DispatchMode, RegistryConfig};
use crate::error::{DispatchError, DispatchFailure, ReceiveError, RegistryError};
use crate::event::{Event, EventSummary, Payload};
use crate::id::{ComponentId, EventId};
use crate::observer::{DispatchObserver, TracingObserver};
use crate::policy::{Broadcast, DispatchPolicy};
use std::any::Any;
use std::collections::HashSet;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Outcome of a successful `notify`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub event_id: EventId,
    /// Recipients invoked (sync) or spawned (async)
    pub recipients: usize,
    pub mode: DispatchMode,
}

struct Member<P: Payload> {
    id: ComponentId,
    component: Arc<dyn Component<P>>,
}

impl<P: Payload> Clone for Member<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            component: Arc::clone(&self.component),
        }
    }
}

/// Counts outstanding async work so callers can wait for a cascade to settle
#[derive(Default)]
struct Tracker {
    in_flight: AtomicUsize,
    idle: Notify,
}

struct InFlight(Arc<Tracker>);

impl Tracker {
    fn start(self: &Arc<Self>) -> InFlight {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight(Arc::clone(self))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

struct Shared<P: Payload> {
    members: RwLock<Vec<Member<P>>>,
    policy: Box<dyn DispatchPolicy<P>>,
    observer: Arc<dyn DispatchObserver>,
    config: RegistryConfig,
    tracker: Arc<Tracker>,
    cancel: CancellationToken,
}

/// Central dispatcher for one set of components.
///
/// Clones share the same membership. Each registry built with
/// [`Registry::new`] or [`Registry::builder`] is independent.
pub struct Registry<P: Payload> {
    shared: Arc<Shared<P>>,
}

/// Builder for a [`Registry`] with a custom policy or observer
pub struct RegistryBuilder<P: Payload> {
    config: RegistryConfig,
    policy: Box<dyn DispatchPolicy<P>>,
    observer: Arc<dyn DispatchObserver>,
}

impl<P: Payload> RegistryBuilder<P> {
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn policy(mut self, policy: impl DispatchPolicy<P> + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn observer(mut self, observer: impl DispatchObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn build(self) -> Registry<P> {
        Registry {
            shared: Arc::new(Shared {
                members: RwLock::new(Vec::new()),
                policy: self.policy,
                observer: self.observer,
                config: self.config,
                tracker: Arc::new(Tracker::default()),
                cancel: CancellationToken::new(),
            }),
        }
    }
}

impl<P: Payload> Registry<P> {
    /// Registry with the broadcast policy and tracing observer
    pub fn new(config: RegistryConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> RegistryBuilder<P> {
        RegistryBuilder {
            config: RegistryConfig::default(),
            policy: Box::new(Broadcast),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.shared.config
    }

    pub fn mode(&self) -> DispatchMode {
        self.shared.config.mode
    }

    /// Add a component. Fails if its id is taken; the existing member stays.
    pub fn register<C: Component<P> + 'static>(
        &self,
        component: Arc<C>,
    ) -> Result<(), RegistryError> {
        let id = component.id().clone();
        let mut members = self.shared.members.write().unwrap_or_else(|e| e.into_inner());

        if members.iter().any(|m| m.id == id) {
            tracing::warn!(component = %id, "duplicate registration rejected");
            return Err(RegistryError::DuplicateId(id));
        }

        tracing::debug!(component = %id, "registered");
        members.push(Member { id, component });
        Ok(())
    }

    /// Remove a component. Returns false if it was not registered.
    ///
    /// Async deliveries already spawned for it may still run.
    pub fn unregister(&self, id: &ComponentId) -> bool {
        let mut members = self.shared.members.write().unwrap_or_else(|e| e.into_inner());
        let before = members.len();
        members.retain(|m| &m.id != id);
        let removed = members.len() != before;
        if removed {
            tracing::debug!(component = %id, "unregistered");
        }
        removed
    }

    /// Remove every component, returning how many were registered
    pub fn unregister_all(&self) -> usize {
        let mut members = self.shared.members.write().unwrap_or_else(|e| e.into_inner());
        let count = members.len();
        members.clear();
        count
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.shared
            .members
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|m| &m.id == id)
    }

    /// Registered ids in registration order
    pub fn members(&self) -> Vec<ComponentId> {
        self.shared
            .members
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|m| m.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shared
            .members
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Send `payload` from `sender` to every recipient the policy selects
    pub fn notify(&self, sender: &ComponentId, payload: P) -> Result<Dispatched, DispatchError> {
        self.dispatch(Event::new(sender.clone(), payload))
    }

    /// Dispatch a prebuilt event as a top-level (non-cascaded) notification
    pub fn dispatch(&self, event: Event<P>) -> Result<Dispatched, DispatchError> {
        self.dispatch_at(event, 0)
    }

    pub(crate) fn dispatch_at(
        &self,
        event: Event<P>,
        depth: u32,
    ) -> Result<Dispatched, DispatchError> {
        if self.shared.cancel.is_cancelled() {
            return Err(DispatchError::ShutDown);
        }

        let limit = self.shared.config.max_cascade_depth;
        if depth > limit {
            tracing::warn!(event = event.name(), depth, limit, "cascade too deep");
            return Err(DispatchError::CascadeTooDeep { depth, limit });
        }

        let mode = self.shared.config.mode;
        let handle = match mode {
            DispatchMode::Sync => None,
            DispatchMode::Async => {
                Some(Handle::try_current().map_err(|_| DispatchError::NoRuntime)?)
            }
        };

        let event = Arc::new(event);
        let span = tracing::debug_span!(
            "dispatch",
            event = event.name(),
            event_id = %event.id(),
            sender = %event.sender(),
            depth
        );
        let _enter = span.enter();

        let recipients = self.resolve(&event);
        let count = recipients.len();
        tracing::debug!(recipients = count, %mode, "dispatching");

        match handle {
            None => {
                for member in &recipients {
                    self.deliver(member, &event, depth);
                }
            }
            Some(handle) => {
                for member in recipients {
                    let registry = self.clone();
                    let event = Arc::clone(&event);
                    let task = self.shared.tracker.start();
                    handle.spawn(
                        async move {
                            let _task = task;
                            registry.deliver(&member, &event, depth);
                        }
                        .instrument(span.clone()),
                    );
                }
            }
        }

        Ok(Dispatched {
            event_id: event.id().clone(),
            recipients: count,
            mode,
        })
    }

    /// Ask the policy for recipients, then enforce sender exclusion,
    /// drop duplicates and resolve ids to members.
    fn resolve(&self, event: &Event<P>) -> Vec<Member<P>> {
        let members = self.shared.members.read().unwrap_or_else(|e| e.into_inner());
        let ids: Vec<ComponentId> = members.iter().map(|m| m.id.clone()).collect();
        let selected = self.shared.policy.recipients(&ids, event);

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(selected.len());
        let mut unknown = Vec::new();

        for id in selected {
            if &id == event.sender() {
                tracing::debug!(recipient = %id, "policy selected the sender, skipping");
                continue;
            }
            if !seen.insert(id.clone()) {
                continue;
            }
            match members.iter().find(|m| m.id == id) {
                Some(member) => resolved.push(member.clone()),
                None => unknown.push(id),
            }
        }
        drop(members);

        for recipient in unknown {
            self.shared.observer.failed(&DispatchFailure::UnknownRecipient {
                recipient,
                event: event.summary(),
            });
        }

        resolved
    }

    /// Invoke one recipient, isolating its errors and panics
    fn deliver(&self, member: &Member<P>, event: &Event<P>, depth: u32) {
        let cascade = Cascade::new(self.clone(), member.id.clone(), event.summary(), depth);

        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| member.component.receive(event, &cascade)));
        let result = outcome
            .unwrap_or_else(|payload| Err(ReceiveError::Panicked(panic_message(payload.as_ref()))));

        match result {
            Ok(()) => {
                tracing::debug!(recipient = %member.id, "delivered");
                self.shared.observer.delivered(&member.id, cascade.cause());
            }
            Err(error) => {
                self.shared.observer.failed(&DispatchFailure::Recipient {
                    recipient: member.id.clone(),
                    event: event.summary(),
                    error,
                });
            }
        }
    }

    pub(crate) fn spawn_tracked<F>(
        &self,
        owner: ComponentId,
        cause: EventSummary,
        work: F,
    ) -> Result<(), DispatchError>
    where
        F: Future<Output = Result<(), ReceiveError>> + Send + 'static,
    {
        if self.shared.cancel.is_cancelled() {
            return Err(DispatchError::ShutDown);
        }
        let handle = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;
        let task = self.shared.tracker.start();
        let observer = Arc::clone(&self.shared.observer);

        let work = handle.spawn(work);
        handle.spawn(async move {
            let _task = task;
            let result = match work.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => {
                    Err(ReceiveError::Panicked(panic_message(e.into_panic().as_ref())))
                }
                Err(_) => Ok(()),
            };
            if let Err(error) = result {
                observer.failed(&DispatchFailure::Recipient {
                    recipient: owner,
                    event: cause,
                    error,
                });
            }
        });
        Ok(())
    }

    /// Wait until no async delivery or spawned work is outstanding.
    ///
    /// Work spawned by a cascade keeps the registry busy, so this returns
    /// only once the whole chain has settled.
    pub async fn wait_idle(&self) {
        let tracker = &self.shared.tracker;
        loop {
            let notified = tracker.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if tracker.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Number of async deliveries and spawned tasks still running
    pub fn in_flight(&self) -> usize {
        self.shared.tracker.in_flight.load(Ordering::SeqCst)
    }

    /// Cancel outstanding work and refuse further dispatch.
    ///
    /// Membership is left intact; use `unregister_all` to tear it down.
    pub fn shutdown(&self) {
        tracing::debug!("registry shutting down");
        self.shared.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    pub(crate) fn cancellation(&self) -> CancellationToken {
        self.shared.cancel.child_token()
    }
}

impl<P: Payload> Clone for Registry<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P: Payload> Default for Registry<P> {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl<P: Payload> std::fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("mode", &self.mode())
            .field("members", &self.members())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
