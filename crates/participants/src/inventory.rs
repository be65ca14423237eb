// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory participant
//!
//! Reserves one unit of stock per order once the order is processing.
//! A reservation in progress holds its unit; if the registry shuts down
//! before the reservation completes, the unit goes back on the shelf.

use crate::commerce::Commerce;
use sb_core::{Cascade, Component, ComponentId, Event, ReceiveError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug)]
struct Stock {
    available: u32,
    held: HashSet<String>,
    reserved: HashSet<String>,
}

impl Stock {
    /// Put a held unit back. Returns false if nothing was held.
    fn release(&mut self, order_id: &str) -> bool {
        let released = self.held.remove(order_id);
        if released {
            self.available += 1;
        }
        released
    }

    fn commit(&mut self, order_id: &str) {
        self.held.remove(order_id);
        self.reserved.insert(order_id.to_string());
    }
}

/// Outcome of trying to take a unit for an order
enum Hold {
    Taken,
    AlreadyHandled,
    OutOfStock,
}

pub struct Inventory {
    id: ComponentId,
    latency: Duration,
    stock: Arc<Mutex<Stock>>,
}

impl Inventory {
    pub fn new(id: impl Into<ComponentId>, stock: u32) -> Self {
        Self {
            id: id.into(),
            latency: Duration::ZERO,
            stock: Arc::new(Mutex::new(Stock {
                available: stock,
                held: HashSet::new(),
                reserved: HashSet::new(),
            })),
        }
    }

    /// Time a reservation takes
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Whether `order_id` can still get a unit: it already has one, or one is free
    pub fn check_availability(&self, order_id: &str) -> bool {
        let stock = self.stock();
        let available = stock.held.contains(order_id)
            || stock.reserved.contains(order_id)
            || stock.available > 0;
        tracing::info!(inventory = %self.id, order = order_id, available, "checked availability");
        available
    }

    /// Units neither held nor reserved
    pub fn available(&self) -> u32 {
        self.stock().available
    }

    pub fn is_reserved(&self, order_id: &str) -> bool {
        self.stock().reserved.contains(order_id)
    }

    /// Whether a reservation for `order_id` is still running
    pub fn is_held(&self, order_id: &str) -> bool {
        self.stock().held.contains(order_id)
    }

    fn stock(&self) -> MutexGuard<'_, Stock> {
        self.stock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take(&self, order_id: &str) -> Hold {
        let mut stock = self.stock();
        if stock.held.contains(order_id) || stock.reserved.contains(order_id) {
            return Hold::AlreadyHandled;
        }
        if stock.available == 0 {
            return Hold::OutOfStock;
        }
        stock.available -= 1;
        stock.held.insert(order_id.to_string());
        Hold::Taken
    }

    fn reserve(&self, order_id: &str, cascade: &Cascade<Commerce>) -> Result<(), ReceiveError> {
        match self.take(order_id) {
            Hold::AlreadyHandled => {
                tracing::debug!(inventory = %self.id, order = order_id, "reservation already handled");
                return Ok(());
            }
            Hold::OutOfStock => {
                tracing::info!(inventory = %self.id, order = order_id, "out of stock");
                cascade.notify(Commerce::ReservationFailed {
                    order_id: order_id.to_string(),
                    reason: "out of stock".to_string(),
                })?;
                return Ok(());
            }
            Hold::Taken => {}
        }

        if self.latency.is_zero() {
            self.stock().commit(order_id);
            tracing::info!(inventory = %self.id, order = order_id, "items reserved");
            cascade.notify(Commerce::InventoryReserved {
                order_id: order_id.to_string(),
            })?;
            return Ok(());
        }

        tracing::info!(
            inventory = %self.id,
            order = order_id,
            latency_ms = self.latency.as_millis() as u64,
            "reserving items"
        );
        let work = reserve_later(
            self.id.clone(),
            order_id.to_string(),
            self.latency,
            Arc::clone(&self.stock),
            cascade.clone(),
        );
        if let Err(e) = cascade.spawn(work) {
            self.stock().release(order_id);
            return Err(e.into());
        }
        Ok(())
    }
}

async fn reserve_later(
    id: ComponentId,
    order_id: String,
    latency: Duration,
    stock: Arc<Mutex<Stock>>,
    cascade: Cascade<Commerce>,
) -> Result<(), ReceiveError> {
    let cancelled = cascade.cancellation();
    tokio::select! {
        _ = cancelled.cancelled() => {
            stock.lock().unwrap_or_else(|e| e.into_inner()).release(&order_id);
            tracing::info!(inventory = %id, order = %order_id, "reservation cancelled, stock released");
            Ok(())
        }
        _ = tokio::time::sleep(latency) => {
            stock.lock().unwrap_or_else(|e| e.into_inner()).commit(&order_id);
            tracing::info!(inventory = %id, order = %order_id, "items reserved");
            cascade
                .notify(Commerce::InventoryReserved { order_id })
                .map(|_| ())
                .map_err(ReceiveError::from)
        }
    }
}

impl Component<Commerce> for Inventory {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn receive(
        &self,
        event: &Event<Commerce>,
        cascade: &Cascade<Commerce>,
    ) -> Result<(), ReceiveError> {
        match event.payload() {
            Commerce::OrderProcessing { order_id } => self.reserve(order_id, cascade),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
