use axum_courier_api::models::OrderStatus;

use OrderStatus::*;

#[test]
fn delivery_chain_is_legal_in_order() {
    let chain = [
        Pending,
        Accepted,
        PickedUp,
        InTransit,
        OutForDelivery,
        Delivered,
    ];
    for pair in chain.windows(2) {
        assert!(
            pair[0].can_transition_to(pair[1]),
            "{} -> {} should be legal",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn skipping_ahead_is_illegal() {
    assert!(!Pending.can_transition_to(PickedUp));
    assert!(!Pending.can_transition_to(Delivered));
    assert!(!Accepted.can_transition_to(InTransit));
    assert!(!InTransit.can_transition_to(Delivered));
}

#[test]
fn moving_backwards_is_illegal() {
    assert!(!Accepted.can_transition_to(Pending));
    assert!(!InTransit.can_transition_to(PickedUp));
    assert!(!OutForDelivery.can_transition_to(InTransit));
}

#[test]
fn cancellation_and_failure_reachable_from_any_non_terminal_state() {
    for status in [Pending, Accepted, PickedUp, InTransit, OutForDelivery] {
        assert!(status.can_transition_to(Cancelled));
        assert!(status.can_transition_to(FailedDelivery));
    }
}

#[test]
fn same_status_event_is_a_legal_ping() {
    for status in [Pending, Accepted, PickedUp, InTransit, OutForDelivery] {
        assert!(status.can_transition_to(status));
    }
}

#[test]
fn terminal_states_accept_nothing() {
    for terminal in [Delivered, Cancelled, FailedDelivery] {
        assert!(terminal.is_terminal());
        for next in [
            Pending,
            Accepted,
            PickedUp,
            InTransit,
            OutForDelivery,
            Delivered,
            Cancelled,
            FailedDelivery,
        ] {
            assert!(
                !terminal.can_transition_to(next),
                "{} -> {} should be illegal",
                terminal,
                next
            );
        }
    }
}

#[test]
fn status_strings_round_trip_case_sensitively() {
    assert_eq!("PICKED_UP".parse::<OrderStatus>(), Ok(PickedUp));
    assert_eq!(PickedUp.as_str(), "PICKED_UP");
    assert!("picked_up".parse::<OrderStatus>().is_err());
    assert!("SHIPPED".parse::<OrderStatus>().is_err());
}
