//! FIFO backlog of not-yet-sent orders.
//!
//! Orders that arrive after the cycle budget is exhausted wait here in
//! arrival order until the next drain. While queued they remain mutable by
//! identifier: a Modify overwrites price/qty in place, a Cancel removes the
//! entry. Once an order leaves the backlog it is gone for good; mutations
//! for it report not-found.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use pacer_core::{OrderId, OrderRequest, Price, Qty};

/// Thread-safe FIFO queue of pending orders, mutable by identifier.
///
/// Lookup is a linear scan; backlogs are expected to stay small (at most a
/// few cycles worth of overflow).
#[derive(Debug, Default)]
pub struct Backlog {
    queue: Mutex<VecDeque<OrderRequest>>,
}

impl Backlog {
    /// Create an empty backlog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order at the tail, preserving arrival order.
    pub fn push(&self, order: OrderRequest) {
        self.queue.lock().push_back(order);
    }

    /// Remove and return the head of the queue.
    #[must_use]
    pub fn pop(&self) -> Option<OrderRequest> {
        self.queue.lock().pop_front()
    }

    /// Return an order to the head of the queue.
    ///
    /// Used by the drain when the budget runs out after a pop, so FIFO
    /// order is preserved for the next cycle.
    pub fn push_front(&self, order: OrderRequest) {
        self.queue.lock().push_front(order);
    }

    /// Overwrite price/qty of the first queued entry with this identifier.
    ///
    /// Repeated modifications simply overwrite again; last writer wins.
    ///
    /// # Returns
    /// - `true` if an entry was modified
    /// - `false` if no queued entry matched
    pub fn modify(&self, id: OrderId, price: Price, qty: Qty) -> bool {
        let mut queue = self.queue.lock();
        if let Some(entry) = queue.iter_mut().find(|o| o.id == id) {
            entry.price = price;
            entry.qty = qty;
            debug!(%id, %price, %qty, "Modified queued order");
            true
        } else {
            false
        }
    }

    /// Remove the first queued entry with this identifier.
    ///
    /// # Returns
    /// - `true` if an entry was removed
    /// - `false` if no queued entry matched
    pub fn cancel(&self, id: OrderId) -> bool {
        let mut queue = self.queue.lock();
        if let Some(pos) = queue.iter().position(|o| o.id == id) {
            queue.remove(pos);
            debug!(%id, "Cancelled queued order");
            true
        } else {
            false
        }
    }

    /// Current queue depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
