//! Order request and response types.
//!
//! An `OrderRequest` is the single inbound message shape: a New order to be
//! dispatched or queued, or a Modify/Cancel acting on a still-queued order.
//! An `OrderResponse` arrives asynchronously from the venue and is matched
//! back to its originating request by identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Price, Qty};

/// Caller-assigned order identifier.
///
/// Uniqueness is required only among currently queued or in-flight orders.
/// Reuse of an identifier while a prior use is still pending is an
/// unenforced caller precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Kind of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// New order to dispatch or queue.
    New,
    /// Overwrite price/qty of a still-queued order.
    Modify,
    /// Remove a still-queued order.
    Cancel,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Modify => write!(f, "modify"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Inbound order request.
///
/// Price and quantity are passed through unvalidated. For Cancel requests
/// they carry no meaning and are conventionally zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Order identifier.
    pub id: OrderId,
    /// Request kind.
    pub kind: RequestKind,
    /// Limit price.
    pub price: Price,
    /// Order quantity.
    pub qty: Qty,
}

impl OrderRequest {
    /// Create a New order request.
    #[must_use]
    pub fn new_order(id: OrderId, price: Price, qty: Qty) -> Self {
        Self {
            id,
            kind: RequestKind::New,
            price,
            qty,
        }
    }

    /// Create a Modify request targeting a queued order.
    #[must_use]
    pub fn modify(id: OrderId, price: Price, qty: Qty) -> Self {
        Self {
            id,
            kind: RequestKind::Modify,
            price,
            qty,
        }
    }

    /// Create a Cancel request targeting a queued order.
    #[must_use]
    pub fn cancel(id: OrderId) -> Self {
        Self {
            id,
            kind: RequestKind::Cancel,
            price: Price::ZERO,
            qty: Qty::ZERO,
        }
    }
}

/// Asynchronous venue response to a previously sent order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Identifier of the originating request.
    pub id: OrderId,
    /// Free-form response kind (e.g. "accepted", "rejected", "filled").
    pub kind: String,
}

impl OrderResponse {
    /// Create a response for the given order.
    #[must_use]
    pub fn new(id: OrderId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}
