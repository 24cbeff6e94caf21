//! Throttling, queueing and session engine for paced order submission.
//!
//! The engine gates inbound orders against a daily trading window, enforces
//! a per-cycle submission budget, queues the excess in a FIFO backlog that
//! supports in-place modify/cancel, and correlates venue responses back to
//! their originating sends to measure round-trip latency. Two fixed-cadence
//! background tasks drive session evaluation and the budget-reset/drain
//! cycle.

pub mod backlog;
pub mod budget;
pub mod config;
pub mod correlator;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;

pub use backlog::Backlog;
pub use budget::SubmissionBudget;
pub use config::EngineConfig;
pub use correlator::ResponseCorrelator;
pub use dispatcher::Dispatcher;
pub use error::{EngineError, Result};
pub use events::{EventSink, RecordingSink, SinkEvent};
pub use scheduler::EngineScheduler;
pub use session::{SessionMonitor, SessionWindow};
