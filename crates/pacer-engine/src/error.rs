//! Engine error types.
//!
//! These cover construction-time configuration problems only. Runtime
//! abnormal inputs (closed-session submits, not-found mutations, stale
//! responses) are reported through outcomes and sink notifications, never
//! as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid trading window: {0}")]
    InvalidWindow(String),

    #[error("Invalid submission limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid cycle length: {0}")]
    InvalidCycle(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
