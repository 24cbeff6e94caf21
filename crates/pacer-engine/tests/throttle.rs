//! End-to-end scenarios for the throttling engine: admission gating,
//! budget conservation across cycles, FIFO drains, backlog mutation and
//! response correlation.

use std::sync::Arc;

use chrono::NaiveTime;
use rust_decimal_macros::dec;

use pacer_core::{MutateOutcome, OrderId, OrderRequest, OrderResponse, Price, Qty, SubmitOutcome};
use pacer_engine::{Dispatcher, EngineConfig, RecordingSink, SinkEvent};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn order(id: u64) -> OrderRequest {
    OrderRequest::new_order(OrderId::new(id), Price::new(dec!(100)), Qty::new(dec!(1)))
}

/// Dispatcher with the default 10:00-13:00 window already open, logon
/// event cleared away.
fn open_engine(limit: u32) -> (Arc<RecordingSink>, Dispatcher) {
    let sink = Arc::new(RecordingSink::new());
    let config = EngineConfig {
        max_orders_per_cycle: limit,
        ..EngineConfig::default()
    };
    let dispatcher = Dispatcher::new(&config, sink.clone()).unwrap();
    dispatcher.evaluate_session(t(11, 0));
    sink.clear();
    (sink, dispatcher)
}

#[test]
fn burst_of_150_against_limit_100() {
    let (sink, engine) = open_engine(100);

    for id in 1..=150u64 {
        engine.submit(order(id));
    }

    // Orders 1-100 sent immediately, 101-150 queued
    let sent = sink.sent_ids();
    assert_eq!(sent.len(), 100);
    assert_eq!(sent.first(), Some(&OrderId::new(1)));
    assert_eq!(sent.last(), Some(&OrderId::new(100)));
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Queued(_))),
        50
    );
    assert_eq!(engine.budget_used(), 100);
    assert_eq!(engine.backlog_depth(), 50);

    sink.clear();
    engine.drain_cycle();

    // Counter reset then consumed by the 50 drained orders, FIFO
    let drained = sink.sent_ids();
    assert_eq!(drained.len(), 50);
    assert_eq!(drained.first(), Some(&OrderId::new(101)));
    assert_eq!(drained.last(), Some(&OrderId::new(150)));
    assert_eq!(engine.budget_used(), 50);
    assert_eq!(engine.backlog_depth(), 0);
}

#[test]
fn budget_never_exceeded_within_a_cycle() {
    let (sink, engine) = open_engine(10);

    for id in 1..=25u64 {
        engine.submit(order(id));
    }
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Send(_))),
        10
    );

    sink.clear();
    engine.drain_cycle();
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Send(_))),
        10
    );

    sink.clear();
    engine.drain_cycle();
    assert_eq!(sink.count_matching(|e| matches!(e, SinkEvent::Send(_))), 5);
    assert_eq!(engine.budget_used(), 5);
}

#[test]
fn fifo_drain_order_preserved() {
    let (sink, engine) = open_engine(1);

    engine.submit(order(10)); // consumes the cycle budget
    for id in [7u64, 8, 9] {
        assert!(engine.submit(order(id)).is_queued());
    }
    sink.clear();

    engine.drain_cycle(); // limit 1 per cycle
    engine.drain_cycle();
    engine.drain_cycle();

    assert_eq!(
        sink.sent_ids(),
        vec![OrderId::new(7), OrderId::new(8), OrderId::new(9)]
    );
}

#[test]
fn cancel_before_drain_prevents_send() {
    let (sink, engine) = open_engine(1);

    engine.submit(order(1)); // budget gone
    assert!(engine.submit(order(7)).is_queued());

    let outcome = engine.submit(OrderRequest::cancel(OrderId::new(7)));
    assert_eq!(
        outcome,
        SubmitOutcome::Mutated {
            id: OrderId::new(7),
            outcome: MutateOutcome::Cancelled
        }
    );

    sink.clear();
    engine.drain_cycle();
    assert!(sink.sent_ids().is_empty());
    assert_eq!(engine.backlog_depth(), 0);
}

#[test]
fn modify_overwrites_until_drained() {
    let (sink, engine) = open_engine(1);

    engine.submit(order(1));
    engine.submit(order(5)); // queued at price 100 / qty 1

    engine.submit(OrderRequest::modify(
        OrderId::new(5),
        Price::new(dec!(101)),
        Qty::new(dec!(2)),
    ));
    engine.submit(OrderRequest::modify(
        OrderId::new(5),
        Price::new(dec!(102)),
        Qty::new(dec!(3)),
    ));

    // Modify on an id that is not queued
    let outcome = engine.submit(OrderRequest::modify(
        OrderId::new(1),
        Price::new(dec!(1)),
        Qty::new(dec!(1)),
    ));
    assert_eq!(
        outcome,
        SubmitOutcome::Mutated {
            id: OrderId::new(1),
            outcome: MutateOutcome::NotFound
        }
    );
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::NotFound(_))),
        1
    );

    engine.drain_cycle();

    // Only the last modification is in effect at drain time; the engine
    // hands the mutated order to the sink intact
    assert_eq!(engine.backlog_depth(), 0);
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Send(id) if *id == OrderId::new(5))),
        1
    );
}

#[test]
fn duplicate_responses_log_latency_once() {
    let (sink, engine) = open_engine(10);

    engine.submit(order(3));
    engine.on_response(OrderResponse::new(OrderId::new(3), "filled"));
    engine.on_response(OrderResponse::new(OrderId::new(3), "filled"));

    let latencies: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, SinkEvent::Latency { .. }))
        .collect();
    assert_eq!(latencies.len(), 1);
    match &latencies[0] {
        SinkEvent::Latency {
            id, response_kind, ..
        } => {
            assert_eq!(*id, OrderId::new(3));
            assert_eq!(response_kind.as_str(), "filled");
        }
        _ => unreachable!(),
    }
}

#[test]
fn session_transitions_gate_submissions() {
    let sink = Arc::new(RecordingSink::new());
    let engine = Dispatcher::new(&EngineConfig::default(), sink.clone()).unwrap();

    // Before open: reject
    engine.evaluate_session(t(9, 59));
    assert!(engine.submit(order(1)).is_rejected());

    // Open edge: logon once, then submissions flow
    engine.evaluate_session(t(10, 0));
    engine.evaluate_session(t(11, 0));
    assert!(engine.submit(order(2)).is_sent());

    // Close edge: logout once, submissions rejected again
    engine.evaluate_session(t(13, 0));
    engine.evaluate_session(t(14, 0));
    assert!(engine.submit(order(3)).is_rejected());

    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Logon)),
        1
    );
    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Logout)),
        1
    );
}

#[test]
fn responses_are_not_session_gated() {
    let (sink, engine) = open_engine(10);

    engine.submit(order(4));
    // Session closes before the venue answers
    engine.evaluate_session(t(13, 30));
    engine.on_response(OrderResponse::new(OrderId::new(4), "accepted"));

    assert_eq!(
        sink.count_matching(|e| matches!(e, SinkEvent::Latency { .. })),
        1
    );
}
