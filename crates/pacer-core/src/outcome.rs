//! Outcome types for the admission/throttle decision path.
//!
//! Every abnormal input degrades to an outcome plus a notification; none of
//! these are errors and none halt processing of subsequent orders.

use serde::{Deserialize, Serialize};

use crate::order::OrderId;

/// Reason for rejecting an order at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Session is closed; order arrived outside the trading window.
    MarketClosed,
}

/// Result of a Modify/Cancel acting on the backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutateOutcome {
    /// Queued order's price/qty were overwritten in place.
    Modified,
    /// Queued order was removed.
    Cancelled,
    /// No queued order with that identifier (already sent, already
    /// cancelled, or never existed).
    NotFound,
}

/// Result of submitting a request to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// New order dispatched immediately within budget.
    Sent {
        /// Identifier of the dispatched order.
        id: OrderId,
    },
    /// New order appended to the backlog; budget exhausted this cycle.
    Queued {
        /// Identifier of the queued order.
        id: OrderId,
    },
    /// Order rejected at admission; no state was mutated.
    Rejected {
        /// Identifier of the rejected order.
        id: OrderId,
        /// Reason for rejection.
        reason: RejectReason,
    },
    /// Modify/Cancel was applied to (or missed) the backlog.
    Mutated {
        /// Identifier the mutation targeted.
        id: OrderId,
        /// What the mutation did.
        outcome: MutateOutcome,
    },
}

impl SubmitOutcome {
    /// Returns true if the order was handed to the venue.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// Returns true if the order is waiting in the backlog.
    #[must_use]
    pub fn is_queued(&self) -> bool {
        matches!(self, Self::Queued { .. })
    }

    /// Returns true if the order was rejected at admission.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
