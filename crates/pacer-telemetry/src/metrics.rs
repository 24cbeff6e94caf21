//! Prometheus metrics for the pacer engine.
//!
//! Covers the engine's observable surface:
//! - Admission outcomes (sent / queued / rejected)
//! - Backlog mutations that missed (not-found)
//! - Round-trip latency once a response correlates
//! - Backlog depth and session state
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent
//! failure. These panics only occur during static initialization, never at
//! runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Histogram, IntCounter, IntGauge,
};

/// Orders handed to the venue (immediate sends and backlog drains).
pub static ORDERS_SENT_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pacer_orders_sent_total",
        "Orders handed to the venue (immediate and drained)"
    )
    .unwrap()
});

/// Orders deferred to the backlog because the cycle budget was exhausted.
pub static ORDERS_QUEUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pacer_orders_queued_total",
        "Orders deferred to the backlog (budget exhausted)"
    )
    .unwrap()
});

/// Orders rejected at admission (session closed).
pub static ORDERS_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pacer_orders_rejected_total",
        "Orders rejected at admission (session closed)"
    )
    .unwrap()
});

/// Modify/Cancel requests that found no queued entry.
pub static MUTATIONS_NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pacer_mutations_not_found_total",
        "Modify/Cancel requests referencing no queued order"
    )
    .unwrap()
});

/// Round-trip latency in microseconds.
pub static RESPONSE_LATENCY_US: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pacer_response_latency_us",
        "Round-trip latency from send to correlated response, microseconds",
        vec![
            50.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0, 5_000.0, 10_000.0, 50_000.0, 100_000.0,
            500_000.0, 1_000_000.0
        ]
    )
    .unwrap()
});

/// Current backlog depth.
pub static BACKLOG_DEPTH: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("pacer_backlog_depth", "Orders waiting in the backlog").unwrap()
});

/// Session state (1 = open, 0 = closed).
pub static SESSION_OPEN: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("pacer_session_open", "Trading session state (1=open)").unwrap()
});

/// Facade for recording metrics from the event path.
pub struct Metrics;

impl Metrics {
    /// Record an order send.
    pub fn order_sent() {
        ORDERS_SENT_TOTAL.inc();
    }

    /// Record an order deferred to the backlog.
    pub fn order_queued() {
        ORDERS_QUEUED_TOTAL.inc();
    }

    /// Record an admission rejection.
    pub fn order_rejected() {
        ORDERS_REJECTED_TOTAL.inc();
    }

    /// Record a Modify/Cancel miss.
    pub fn mutation_not_found() {
        MUTATIONS_NOT_FOUND_TOTAL.inc();
    }

    /// Record a correlated round-trip latency.
    pub fn response_latency(latency_us: u64) {
        RESPONSE_LATENCY_US.observe(latency_us as f64);
    }

    /// Record the session state after a transition.
    pub fn session_open(open: bool) {
        SESSION_OPEN.set(i64::from(open));
    }

    /// Record the current backlog depth.
    pub fn backlog_depth(depth: usize) {
        BACKLOG_DEPTH.set(depth as i64);
    }
}
