// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch policies: who receives an event, and in what order

use crate::event::{Event, Payload};
use crate::id::ComponentId;
use crate::pattern::EventPattern;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Strategy computing the recipients of an event.
///
/// `members` lists registered ids in registration order. The registry
/// removes the sender, drops duplicates and skips unknown ids after the
/// policy runs, so implementations need not be careful about any of those.
pub trait DispatchPolicy<P: Payload>: Send + Sync {
    fn recipients(&self, members: &[ComponentId], event: &Event<P>) -> Vec<ComponentId>;
}

impl<P, F> DispatchPolicy<P> for F
where
    P: Payload,
    F: Fn(&[ComponentId], &Event<P>) -> Vec<ComponentId> + Send + Sync,
{
    fn recipients(&self, members: &[ComponentId], event: &Event<P>) -> Vec<ComponentId> {
        self(members, event)
    }
}

/// Every registered component except the sender, in registration order.
///
/// Recipients filter by event name themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Broadcast;

impl<P: Payload> DispatchPolicy<P> for Broadcast {
    fn recipients(&self, members: &[ComponentId], event: &Event<P>) -> Vec<ComponentId> {
        members
            .iter()
            .filter(|id| *id != event.sender())
            .cloned()
            .collect()
    }
}

/// Delivers only to components subscribed to a matching pattern.
///
/// Components without a subscription receive nothing. Clones share the
/// subscription table, so a handle kept by the caller can change
/// subscriptions after the policy is installed in a registry.
#[derive(Debug, Clone, Default)]
pub struct Topics {
    subscriptions: Arc<RwLock<HashMap<ComponentId, Vec<EventPattern>>>>,
}

impl Topics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add patterns to a component's subscription
    pub fn subscribe<I, T>(&self, id: impl Into<ComponentId>, patterns: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<EventPattern>,
    {
        let mut subs = self
            .subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner());
        subs.entry(id.into())
            .or_default()
            .extend(patterns.into_iter().map(Into::into));
    }

    /// Remove a component's subscription entirely
    pub fn unsubscribe(&self, id: &ComponentId) {
        let mut subs = self
            .subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner());
        subs.remove(id);
    }

    pub fn patterns_for(&self, id: &ComponentId) -> Vec<EventPattern> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn is_subscribed(&self, id: &ComponentId, event_name: &str) -> bool {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .is_some_and(|patterns| patterns.iter().any(|p| p.matches(event_name)))
    }
}

impl<P: Payload> DispatchPolicy<P> for Topics {
    fn recipients(&self, members: &[ComponentId], event: &Event<P>) -> Vec<ComponentId> {
        members
            .iter()
            .filter(|id| *id != event.sender() && self.is_subscribed(id, event.name()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
