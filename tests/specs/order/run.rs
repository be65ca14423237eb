//! Order fulfillment specs
//!
//! Verify `sb order` drives an order to its final status in both modes.

use crate::prelude::*;

#[test]
fn sync_order_ends_ready_to_ship() {
    Project::empty()
        .sb()
        .args(&["order"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: ready_to_ship\n")
        .stderr_is_empty();
}

#[test]
fn async_order_with_latency_ends_ready_to_ship() {
    Project::empty()
        .sb()
        .args(&[
            "order",
            "--mode",
            "async",
            "--payment-latency-ms",
            "30",
            "--reservation-latency-ms",
            "20",
        ])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: ready_to_ship\n");
}

#[test]
fn sync_order_with_latency_still_settles() {
    Project::empty()
        .sb()
        .args(&["order", "--payment-latency-ms", "10"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: ready_to_ship\n");
}

#[test]
fn declined_payment_fails_the_order() {
    Project::empty()
        .sb()
        .args(&["order", "--decline"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: failed\nfailure: card declined\n");
}

#[test]
fn no_stock_means_no_payment() {
    Project::empty()
        .sb()
        .args(&["order", "--stock", "0"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: pending\n");
}

#[test]
fn deadline_cancels_slow_reservation() {
    Project::empty()
        .sb()
        .args(&[
            "order",
            "--mode",
            "async",
            "--reservation-latency-ms",
            "30000",
            "--deadline-ms",
            "100",
        ])
        .passes()
        .stdout_eq(
            "initial status: pending\nfinal status: failed\nfailure: cancelled before completion\n",
        );
}

#[test]
fn custom_order_id_is_reported_in_json() {
    Project::empty()
        .sb()
        .args(&["order", "--order-id", "ORD042", "--format", "json"])
        .passes()
        .stdout_has("\"order_id\": \"ORD042\"")
        .stdout_has("\"final_status\": \"ready_to_ship\"")
        .stdout_has("\"mode\": \"sync\"");
}

#[test]
fn verbose_logs_go_to_stderr() {
    Project::empty()
        .sb()
        .args(&["-v", "order"])
        .passes()
        .stdout_eq("initial status: pending\nfinal status: ready_to_ship\n")
        .stderr_has("status changed");
}
