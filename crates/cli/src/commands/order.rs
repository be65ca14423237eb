// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sb order` - Run one order through payment and inventory

use crate::output::{self, OutputFormat};
use crate::settings::Settings;
use anyhow::Result;
use clap::Args;
use sb_core::{DispatchMode, Registry, RegistryConfig};
use sb_participants::{Commerce, Inventory, Order, OrderStatus, PaymentSystem};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const PAYMENT_ID: &str = "PAY001";
const INVENTORY_ID: &str = "INV001";

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Order id
    #[arg(long, default_value = "ORD001")]
    pub order_id: String,

    /// Dispatch mode (sync or async)
    #[arg(long)]
    pub mode: Option<DispatchMode>,

    /// Payment authorization time
    #[arg(long)]
    pub payment_latency_ms: Option<u64>,

    /// Stock reservation time
    #[arg(long)]
    pub reservation_latency_ms: Option<u64>,

    /// Units in stock
    #[arg(long)]
    pub stock: Option<u32>,

    /// Have the payment system decline this order
    #[arg(long)]
    pub decline: bool,

    /// Cancel outstanding work if the order has not settled by then
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What happened to the order
#[derive(Debug, Serialize)]
pub struct OrderReport {
    pub order_id: String,
    pub mode: DispatchMode,
    pub initial_status: OrderStatus,
    pub final_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl std::fmt::Display for OrderReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "initial status: {}", self.initial_status)?;
        write!(f, "final status: {}", self.final_status)?;
        if let Some(failure) = &self.failure {
            write!(f, "\nfailure: {}", failure)?;
        }
        Ok(())
    }
}

pub async fn handle(args: OrderArgs, settings: &Settings) -> Result<()> {
    let mut config: RegistryConfig = settings.registry.clone();
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    let payment_latency = Duration::from_millis(
        args.payment_latency_ms
            .unwrap_or(settings.order.payment_latency_ms),
    );
    let reservation_latency = Duration::from_millis(
        args.reservation_latency_ms
            .unwrap_or(settings.order.reservation_latency_ms),
    );
    let stock = args.stock.unwrap_or(settings.order.stock);

    let registry: Registry<Commerce> = Registry::new(config);
    let order = Arc::new(Order::new(args.order_id.as_str()));
    let payment = Arc::new(PaymentSystem::new(PAYMENT_ID).with_latency(payment_latency));
    let inventory = Arc::new(Inventory::new(INVENTORY_ID, stock).with_latency(reservation_latency));
    if args.decline {
        payment.decline(args.order_id.as_str(), "card declined");
    }

    registry.register(order.clone())?;
    registry.register(payment)?;
    registry.register(inventory.clone())?;

    let interrupt = registry.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancelling order...");
        interrupt.shutdown();
    })?;

    let initial_status = order.status();
    if inventory.check_availability(&args.order_id) {
        order.pay(&registry)?;
    } else {
        tracing::warn!(order = %args.order_id, "nothing in stock, payment not started");
    }

    settle(&registry, args.deadline_ms.map(Duration::from_millis)).await;
    if registry.is_shut_down() {
        order.cancel("cancelled before completion");
    }

    let state = order.state();
    let report = OrderReport {
        order_id: args.order_id,
        mode: registry.mode(),
        initial_status,
        final_status: state.status,
        failure: state.failure,
    };
    registry.unregister_all();

    output::print(&report, args.format)
}

/// Wait for the cascade to finish, cancelling it once the deadline passes
async fn settle(registry: &Registry<Commerce>, deadline: Option<Duration>) {
    let Some(deadline) = deadline else {
        registry.wait_idle().await;
        return;
    };

    if tokio::time::timeout(deadline, registry.wait_idle())
        .await
        .is_err()
    {
        tracing::warn!(
            deadline_ms = deadline.as_millis() as u64,
            in_flight = registry.in_flight(),
            "deadline passed, cancelling"
        );
        registry.shutdown();
        registry.wait_idle().await;
    }
}
