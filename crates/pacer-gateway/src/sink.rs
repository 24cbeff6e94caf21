//! Telemetry event sink.
//!
//! Realizes the engine's outbound surface as structured log lines plus
//! Prometheus metrics. This is the log side-effect sink the system treats
//! as its venue-facing output; wiring a real transport means replacing
//! this with an implementation that also writes to the wire.

use tracing::{info, warn};

use pacer_core::{OrderId, OrderRequest};
use pacer_engine::EventSink;
use pacer_telemetry::Metrics;

/// `EventSink` backed by tracing and the metrics facade.
#[derive(Debug, Default)]
pub struct TelemetrySink;

impl TelemetrySink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TelemetrySink {
    fn reject(&self, order: &OrderRequest) {
        warn!(id = %order.id, kind = %order.kind, "Market closed, order rejected");
        Metrics::order_rejected();
    }

    fn send(&self, order: &OrderRequest) {
        info!(id = %order.id, price = %order.price, qty = %order.qty, "Order sent");
        Metrics::order_sent();
    }

    fn queued(&self, order: &OrderRequest) {
        info!(id = %order.id, "Order queued");
        Metrics::order_queued();
    }

    fn logon(&self) {
        info!("Market open, sending LOGON");
        Metrics::session_open(true);
    }

    fn logout(&self) {
        info!("Market closed, sending LOGOUT");
        Metrics::session_open(false);
    }

    fn latency(&self, id: OrderId, response_kind: &str, latency_us: u64) {
        info!(%id, response_kind, latency_us, "Response correlated");
        Metrics::response_latency(latency_us);
    }

    fn not_found(&self, id: OrderId) {
        warn!(%id, "Order not found in backlog");
        Metrics::mutation_not_found();
    }
}
