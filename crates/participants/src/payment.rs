// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payment system participant
//!
//! Authorizes payments when an order announces `payment_initiated`. With a
//! non-zero latency the authorization runs as spawned work that holds the
//! payment until it completes or the registry shuts down.

use crate::commerce::Commerce;
use sb_core::{Cascade, Component, ComponentId, DispatchError, Dispatched, Event, ReceiveError, Registry};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Ledger {
    /// Orders to decline, with the reason
    declined: HashMap<String, String>,
    /// Authorizations in progress
    held: HashSet<String>,
    authorized: Vec<String>,
}

impl Ledger {
    fn release(&mut self, order_id: &str) -> bool {
        self.held.remove(order_id)
    }

    fn authorize(&mut self, order_id: &str) {
        self.held.remove(order_id);
        self.authorized.push(order_id.to_string());
    }
}

pub struct PaymentSystem {
    id: ComponentId,
    latency: Duration,
    ledger: Arc<Mutex<Ledger>>,
}

impl PaymentSystem {
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            latency: Duration::ZERO,
            ledger: Arc::new(Mutex::new(Ledger::default())),
        }
    }

    /// Time an authorization takes
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Decline future payments for `order_id`
    pub fn decline(&self, order_id: impl Into<String>, reason: impl Into<String>) {
        self.ledger().declined.insert(order_id.into(), reason.into());
    }

    /// Announce a payment manually.
    ///
    /// The announcement comes from this system, so it never reaches its own
    /// `receive`; other participants see an ordinary `payment_initiated`.
    pub fn process_payment(
        &self,
        registry: &Registry<Commerce>,
        order_id: &str,
    ) -> Result<Dispatched, DispatchError> {
        tracing::info!(payment = %self.id, order = order_id, "manually processing payment");
        registry.notify(
            &self.id,
            Commerce::PaymentInitiated {
                order_id: order_id.to_string(),
            },
        )
    }

    pub fn is_authorized(&self, order_id: &str) -> bool {
        self.ledger().authorized.iter().any(|o| o == order_id)
    }

    /// Whether an authorization for `order_id` is still running
    pub fn is_pending(&self, order_id: &str) -> bool {
        self.ledger().held.contains(order_id)
    }

    /// Authorized order ids, oldest first
    pub fn authorized(&self) -> Vec<String> {
        self.ledger().authorized.clone()
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn initiate(&self, order_id: &str, cascade: &Cascade<Commerce>) -> Result<(), ReceiveError> {
        let declined = {
            let mut ledger = self.ledger();
            if ledger.held.contains(order_id) || ledger.authorized.iter().any(|o| o == order_id) {
                tracing::debug!(payment = %self.id, order = order_id, "payment already handled");
                return Ok(());
            }
            let declined = ledger.declined.get(order_id).cloned();
            if declined.is_none() && !self.latency.is_zero() {
                ledger.held.insert(order_id.to_string());
            }
            declined
        };

        if let Some(reason) = declined {
            tracing::info!(payment = %self.id, order = order_id, %reason, "payment declined");
            cascade.notify(Commerce::PaymentDeclined {
                order_id: order_id.to_string(),
                reason,
            })?;
            return Ok(());
        }

        if self.latency.is_zero() {
            self.ledger().authorize(order_id);
            tracing::info!(payment = %self.id, order = order_id, "payment confirmed");
            cascade.notify(Commerce::PaymentConfirmed {
                order_id: order_id.to_string(),
            })?;
            return Ok(());
        }

        tracing::info!(
            payment = %self.id,
            order = order_id,
            latency_ms = self.latency.as_millis() as u64,
            "processing payment"
        );
        let work = authorize_later(
            self.id.clone(),
            order_id.to_string(),
            self.latency,
            Arc::clone(&self.ledger),
            cascade.clone(),
        );
        if let Err(e) = cascade.spawn(work) {
            self.ledger().release(order_id);
            return Err(e.into());
        }
        Ok(())
    }
}

async fn authorize_later(
    id: ComponentId,
    order_id: String,
    latency: Duration,
    ledger: Arc<Mutex<Ledger>>,
    cascade: Cascade<Commerce>,
) -> Result<(), ReceiveError> {
    let cancelled = cascade.cancellation();
    tokio::select! {
        _ = cancelled.cancelled() => {
            ledger.lock().unwrap_or_else(|e| e.into_inner()).release(&order_id);
            tracing::info!(payment = %id, order = %order_id, "payment cancelled, hold released");
            Ok(())
        }
        _ = tokio::time::sleep(latency) => {
            ledger.lock().unwrap_or_else(|e| e.into_inner()).authorize(&order_id);
            tracing::info!(payment = %id, order = %order_id, "payment confirmed");
            cascade
                .notify(Commerce::PaymentConfirmed { order_id })
                .map(|_| ())
                .map_err(ReceiveError::from)
        }
    }
}

impl Component<Commerce> for PaymentSystem {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn receive(
        &self,
        event: &Event<Commerce>,
        cascade: &Cascade<Commerce>,
    ) -> Result<(), ReceiveError> {
        match event.payload() {
            Commerce::PaymentInitiated { order_id } => self.initiate(order_id, cascade),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "payment_tests.rs"]
mod tests;
