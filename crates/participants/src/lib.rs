// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-participants: components that talk through an `sb_core::Registry`
//!
//! Two independent participant sets:
//! - order fulfillment (`Order`, `PaymentSystem`, `Inventory`) exchanging `Commerce` events
//! - a chat room of `User`s exchanging `ChatMessage`s

pub mod chat;
pub mod commerce;
pub mod inventory;
pub mod order;
pub mod payment;

#[cfg(test)]
mod test_helpers;

pub use chat::{ChatMessage, Received, User};
pub use commerce::Commerce;
pub use inventory::Inventory;
pub use order::{Order, OrderState, OrderStatus};
pub use payment::PaymentSystem;
