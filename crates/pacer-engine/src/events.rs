//! Event sink trait for outbound side effects.
//!
//! Provides a trait-based abstraction over the external collaborators: the
//! venue transport (sends), the notification channel (rejects, queued,
//! not-found), the session link (logon/logout) and the latency log. This
//! allows for:
//! - Dependency injection for testing
//! - Separation of the decision path from transport
//!
//! Every method is an instantaneous abstraction with no defined failure
//! mode, so none of them return a `Result`.

use parking_lot::Mutex;

use pacer_core::{OrderId, OrderRequest};

/// Sink for every outbound effect the engine produces.
pub trait EventSink: Send + Sync {
    /// Order arrived while the session was closed.
    fn reject(&self, order: &OrderRequest);

    /// Order handed to the venue (immediate dispatch or backlog drain).
    fn send(&self, order: &OrderRequest);

    /// Order appended to the backlog; budget exhausted this cycle.
    fn queued(&self, order: &OrderRequest);

    /// Session transitioned Closed -> Open.
    fn logon(&self);

    /// Session transitioned Open -> Closed.
    fn logout(&self);

    /// Venue response correlated back to its send.
    fn latency(&self, id: OrderId, response_kind: &str, latency_us: u64);

    /// Modify/Cancel referenced an identifier absent from the backlog.
    fn not_found(&self, id: OrderId);
}

/// One recorded sink event, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Reject(OrderId),
    Send(OrderId),
    Queued(OrderId),
    Logon,
    Logout,
    Latency {
        id: OrderId,
        response_kind: String,
        latency_us: u64,
    },
    NotFound(OrderId),
}

/// Recording sink for tests and verification harnesses.
///
/// Stores every emission in order behind a mutex so assertions can inspect
/// the exact event sequence.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    /// Create a new empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events matching the predicate.
    pub fn count_matching(&self, pred: impl Fn(&SinkEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }

    /// Identifiers of all `Send` events, in emission order.
    #[must_use]
    pub fn sent_ids(&self) -> Vec<OrderId> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Send(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn reject(&self, order: &OrderRequest) {
        self.events.lock().push(SinkEvent::Reject(order.id));
    }

    fn send(&self, order: &OrderRequest) {
        self.events.lock().push(SinkEvent::Send(order.id));
    }

    fn queued(&self, order: &OrderRequest) {
        self.events.lock().push(SinkEvent::Queued(order.id));
    }

    fn logon(&self) {
        self.events.lock().push(SinkEvent::Logon);
    }

    fn logout(&self) {
        self.events.lock().push(SinkEvent::Logout);
    }

    fn latency(&self, id: OrderId, response_kind: &str, latency_us: u64) {
        self.events.lock().push(SinkEvent::Latency {
            id,
            response_kind: response_kind.to_string(),
            latency_us,
        });
    }

    fn not_found(&self, id: OrderId) {
        self.events.lock().push(SinkEvent::NotFound(id));
    }
}
