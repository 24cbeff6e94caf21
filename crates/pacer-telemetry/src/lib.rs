//! Prometheus metrics and structured logging for pacer.
//!
//! Provides observability for the throttling engine:
//! - Counters for sent/queued/rejected orders and not-found mutations
//! - Round-trip latency histogram
//! - Gauges for backlog depth and session state
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
