// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Order state machine
//!
//! An order waits for payment, then for stock, then is ready to ship.
//! It learns about both only through events; it never talks to the payment
//! system or the inventory directly.

use crate::commerce::Commerce;
use sb_core::{Cascade, Component, ComponentId, DispatchError, Dispatched, Event, ReceiveError, Registry};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting payment confirmation
    Pending,
    /// Paid, awaiting stock reservation
    Processing,
    /// Paid and reserved
    ReadyToShip,
    /// Payment declined, reservation failed, or cancelled mid-flight
    Failed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::ReadyToShip | OrderStatus::Failed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::ReadyToShip => "ready_to_ship",
            OrderStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub status: OrderStatus,
    pub failure: Option<String>,
}

impl Default for OrderState {
    fn default() -> Self {
        Self {
            status: OrderStatus::Pending,
            failure: None,
        }
    }
}

impl OrderState {
    /// Pure transition function - returns new state and events to emit.
    ///
    /// Events for other orders, repeats, and names the order does not
    /// handle leave the state unchanged and emit nothing.
    pub fn transition(&self, order_id: &str, event: &Commerce) -> (OrderState, Vec<Commerce>) {
        if event.order_id() != order_id {
            return (self.clone(), vec![]);
        }

        match (self.status, event) {
            // Pending → Processing
            (OrderStatus::Pending, Commerce::PaymentConfirmed { .. }) => (
                OrderState {
                    status: OrderStatus::Processing,
                    failure: None,
                },
                vec![Commerce::OrderProcessing {
                    order_id: order_id.to_string(),
                }],
            ),

            // Processing → ReadyToShip
            (OrderStatus::Processing, Commerce::InventoryReserved { .. }) => (
                OrderState {
                    status: OrderStatus::ReadyToShip,
                    failure: None,
                },
                vec![],
            ),

            // Pending/Processing → Failed
            (OrderStatus::Pending, Commerce::PaymentDeclined { reason, .. })
            | (OrderStatus::Processing, Commerce::ReservationFailed { reason, .. }) => {
                (self.failed(reason.clone()), vec![])
            }

            _ => (self.clone(), vec![]),
        }
    }

    /// Abandon an in-flight order. Terminal orders are unchanged.
    pub fn cancel(&self, reason: impl Into<String>) -> OrderState {
        if self.status.is_terminal() {
            return self.clone();
        }
        self.failed(reason.into())
    }

    fn failed(&self, reason: String) -> OrderState {
        OrderState {
            status: OrderStatus::Failed,
            failure: Some(reason),
        }
    }
}

/// An order participant; its component id is the order id
pub struct Order {
    id: ComponentId,
    state: Mutex<OrderState>,
}

impl Order {
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(OrderState::default()),
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.state().status
    }

    pub fn state(&self) -> OrderState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Start payment for this order
    pub fn pay(&self, registry: &Registry<Commerce>) -> Result<Dispatched, DispatchError> {
        tracing::info!(order = %self.id, "initiating payment");
        registry.notify(
            &self.id,
            Commerce::PaymentInitiated {
                order_id: self.id.to_string(),
            },
        )
    }

    /// Mark the order failed unless it already finished. Returns true if it changed.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let next = state.cancel(reason);
        let changed = next != *state;
        if changed {
            tracing::info!(order = %self.id, from = %state.status, "order cancelled");
            *state = next;
        }
        changed
    }
}

impl Component<Commerce> for Order {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn receive(
        &self,
        event: &Event<Commerce>,
        cascade: &Cascade<Commerce>,
    ) -> Result<(), ReceiveError> {
        // Release the lock before emitting: a sync cascade can come straight back here
        let emitted = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let (next, emitted) = state.transition(self.id.as_str(), event.payload());
            if next != *state {
                tracing::info!(
                    order = %self.id,
                    from = %state.status,
                    to = %next.status,
                    "status changed"
                );
                *state = next;
            }
            emitted
        };

        for payload in emitted {
            cascade.notify(payload)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
