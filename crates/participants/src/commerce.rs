// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events exchanged by the order-fulfillment participants

use sb_core::Payload;
use serde::{Deserialize, Serialize};

/// Order-fulfillment events, keyed by the order they concern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Commerce {
    PaymentInitiated { order_id: String },
    PaymentConfirmed { order_id: String },
    PaymentDeclined { order_id: String, reason: String },
    OrderProcessing { order_id: String },
    InventoryReserved { order_id: String },
    ReservationFailed { order_id: String, reason: String },
}

impl Commerce {
    pub fn order_id(&self) -> &str {
        match self {
            Commerce::PaymentInitiated { order_id }
            | Commerce::PaymentConfirmed { order_id }
            | Commerce::PaymentDeclined { order_id, .. }
            | Commerce::OrderProcessing { order_id }
            | Commerce::InventoryReserved { order_id }
            | Commerce::ReservationFailed { order_id, .. } => order_id,
        }
    }
}

impl Payload for Commerce {
    fn name(&self) -> &str {
        match self {
            Commerce::PaymentInitiated { .. } => "payment_initiated",
            Commerce::PaymentConfirmed { .. } => "payment_confirmed",
            Commerce::PaymentDeclined { .. } => "payment_declined",
            Commerce::OrderProcessing { .. } => "order_processing",
            Commerce::InventoryReserved { .. } => "inventory_reserved",
            Commerce::ReservationFailed { .. } => "reservation_failed",
        }
    }
}
