//! Core domain types for the pacer order submission engine.
//!
//! This crate provides fundamental types used throughout the system:
//! - `OrderId`: Caller-assigned order identifier
//! - `OrderRequest`, `OrderResponse`: Inbound request/response messages
//! - `Price`, `Qty`: Precision-safe numeric types
//! - `SubmitOutcome`: Result of an admission/throttle decision

pub mod decimal;
pub mod error;
pub mod order;
pub mod outcome;

pub use decimal::{Price, Qty};
pub use error::{CoreError, Result};
pub use order::{OrderId, OrderRequest, OrderResponse, RequestKind};
pub use outcome::{MutateOutcome, RejectReason, SubmitOutcome};
