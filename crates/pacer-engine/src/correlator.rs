//! Request/response latency correlation.
//!
//! Maps an order identifier to its send timestamp while the order is in
//! flight. The first matching response removes the record and yields the
//! round-trip latency; later responses for the same identifier find nothing
//! and are no-ops.

use dashmap::DashMap;

use pacer_core::OrderId;

/// Pending-send records keyed by order identifier.
///
/// Records have no expiry: a sent order that never receives a response
/// stays in the map indefinitely.
#[derive(Debug, Default)]
pub struct ResponseCorrelator {
    sent_at: DashMap<OrderId, u64>,
}

impl ResponseCorrelator {
    /// Create an empty correlator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the send timestamp (microseconds) for an order.
    ///
    /// Overwrites an existing record; under the identifier-uniqueness
    /// precondition that should not happen while the order is in flight.
    pub fn record_send(&self, id: OrderId, sent_at_us: u64) {
        self.sent_at.insert(id, sent_at_us);
    }

    /// Correlate a response with its send record.
    ///
    /// Removes the record so a later duplicate finds nothing, which is the
    /// at-most-once guarantee.
    ///
    /// # Returns
    /// - `Some(latency_us)` on the first matching response
    /// - `None` for an unknown or already-correlated identifier
    #[must_use]
    pub fn correlate(&self, id: OrderId, now_us: u64) -> Option<u64> {
        self.sent_at
            .remove(&id)
            .map(|(_, sent_at)| now_us.saturating_sub(sent_at))
    }

    /// Number of sends still awaiting a response.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.sent_at.len()
    }
}
