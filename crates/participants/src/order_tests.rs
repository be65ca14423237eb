use super::*;
use crate::test_helpers::Listener;
use sb_core::{RecordingObserver, RegistryConfig};
use std::sync::Arc;
use yare::parameterized;

fn confirmed(id: &str) -> Commerce {
    Commerce::PaymentConfirmed {
        order_id: id.to_string(),
    }
}

fn reserved(id: &str) -> Commerce {
    Commerce::InventoryReserved {
        order_id: id.to_string(),
    }
}

// =============================================================================
// Pure transitions
// =============================================================================

#[test]
fn payment_confirmed_moves_pending_to_processing() {
    let state = OrderState::default();
    let (next, emitted) = state.transition("ORD001", &confirmed("ORD001"));

    assert_eq!(next.status, OrderStatus::Processing);
    assert_eq!(
        emitted,
        vec![Commerce::OrderProcessing {
            order_id: "ORD001".to_string()
        }]
    );
}

#[test]
fn inventory_reserved_moves_processing_to_ready() {
    let (processing, _) = OrderState::default().transition("ORD001", &confirmed("ORD001"));
    let (next, emitted) = processing.transition("ORD001", &reserved("ORD001"));

    assert_eq!(next.status, OrderStatus::ReadyToShip);
    assert!(emitted.is_empty());
}

fn processing_state() -> OrderState {
    OrderState::default()
        .transition("ORD001", &confirmed("ORD001"))
        .0
}

fn ready_state() -> OrderState {
    processing_state()
        .transition("ORD001", &reserved("ORD001"))
        .0
}

#[parameterized(
    reservation_before_payment = { OrderState::default(), reserved("ORD001") },
    repeated_confirmation = { processing_state(), confirmed("ORD001") },
    other_order = { OrderState::default(), confirmed("ORD002") },
    initiated_is_not_ours = { OrderState::default(), Commerce::PaymentInitiated { order_id: "ORD001".to_string() } },
    own_processing_echo = { processing_state(), Commerce::OrderProcessing { order_id: "ORD001".to_string() } },
    ready_stays_ready = { ready_state(), Commerce::ReservationFailed { order_id: "ORD001".to_string(), reason: "late".to_string() } },
    decline_after_confirm = { processing_state(), Commerce::PaymentDeclined { order_id: "ORD001".to_string(), reason: "late".to_string() } },
)]
fn ignored_events_change_nothing(state: OrderState, event: Commerce) {
    let (next, emitted) = state.transition("ORD001", &event);
    assert_eq!(next, state);
    assert!(emitted.is_empty());
}

#[test]
fn declined_payment_fails_the_order() {
    let state = OrderState::default();
    let (next, emitted) = state.transition(
        "ORD001",
        &Commerce::PaymentDeclined {
            order_id: "ORD001".to_string(),
            reason: "card expired".to_string(),
        },
    );
    assert_eq!(next.status, OrderStatus::Failed);
    assert_eq!(next.failure.as_deref(), Some("card expired"));
    assert!(emitted.is_empty());
}

#[test]
fn failed_reservation_fails_processing_order() {
    let (processing, _) = OrderState::default().transition("ORD001", &confirmed("ORD001"));
    let (next, _) = processing.transition(
        "ORD001",
        &Commerce::ReservationFailed {
            order_id: "ORD001".to_string(),
            reason: "out of stock".to_string(),
        },
    );
    assert_eq!(next.status, OrderStatus::Failed);
}

#[test]
fn cancel_leaves_terminal_states_alone() {
    let ready = OrderState {
        status: OrderStatus::ReadyToShip,
        failure: None,
    };
    assert_eq!(ready.cancel("too late"), ready);

    let cancelled = OrderState::default().cancel("shutdown");
    assert_eq!(cancelled.status, OrderStatus::Failed);
    assert_eq!(cancelled.failure.as_deref(), Some("shutdown"));
}

#[test]
fn status_displays_snake_case() {
    assert_eq!(OrderStatus::ReadyToShip.to_string(), "ready_to_ship");
    assert_eq!(
        serde_json::to_string(&OrderStatus::ReadyToShip).unwrap(),
        "\"ready_to_ship\""
    );
}

// =============================================================================
// As a registered component
// =============================================================================

fn registry_with_order() -> (Registry<Commerce>, Arc<Order>, RecordingObserver) {
    let observer = RecordingObserver::new();
    let registry = Registry::builder()
        .config(RegistryConfig::default())
        .observer(observer.clone())
        .build();
    let order = Arc::new(Order::new("ORD001"));
    registry.register(order.clone()).unwrap();
    (registry, order, observer)
}

#[test]
fn confirmation_then_reservation_ends_ready_to_ship() {
    let (registry, order, _) = registry_with_order();
    let bank = ComponentId::from("PAY001");
    let warehouse = ComponentId::from("INV001");

    registry.notify(&bank, confirmed("ORD001")).unwrap();
    assert_eq!(order.status(), OrderStatus::Processing);

    registry.notify(&warehouse, reserved("ORD001")).unwrap();
    assert_eq!(order.status(), OrderStatus::ReadyToShip);
}

#[test]
fn confirmation_emits_order_processing_from_the_order() {
    let (registry, _order, observer) = registry_with_order();
    let heard = Arc::new(Listener::new("INV001"));
    registry.register(heard.clone()).unwrap();

    registry
        .notify(&ComponentId::from("PAY001"), confirmed("ORD001"))
        .unwrap();

    assert_eq!(
        observer.delivered_to("payment_confirmed"),
        vec![ComponentId::from("ORD001"), ComponentId::from("INV001")]
    );
    // Depth-first: the order's follow-up lands before the original reaches INV001
    assert_eq!(
        heard.heard(),
        vec![
            (
                ComponentId::from("ORD001"),
                Commerce::OrderProcessing {
                    order_id: "ORD001".to_string()
                }
            ),
            (ComponentId::from("PAY001"), confirmed("ORD001")),
        ]
    );
    assert!(observer.failures().is_empty());
}

#[test]
fn cancel_marks_in_flight_order_failed() {
    let (registry, order, _) = registry_with_order();
    registry
        .notify(&ComponentId::from("PAY001"), confirmed("ORD001"))
        .unwrap();

    assert!(order.cancel("shutdown"));
    assert_eq!(order.status(), OrderStatus::Failed);
    assert!(!order.cancel("again"));
}
