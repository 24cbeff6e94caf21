//! Market session monitoring.
//!
//! Tracks open/closed state against a fixed daily window `[open, close)`
//! and emits edge-triggered logon/logout signals on transitions. The state
//! flag is the admission gate read by the dispatcher on every submit.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveTime;
use tracing::info;

use crate::error::{EngineError, Result};
use crate::events::EventSink;

/// Daily trading window `[open, close)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    open: NaiveTime,
    close: NaiveTime,
}

impl SessionWindow {
    /// Create a window. `open` must precede `close`; overnight windows are
    /// not supported.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        if open >= close {
            return Err(EngineError::InvalidWindow(format!(
                "open {open} must precede close {close}"
            )));
        }
        Ok(Self { open, close })
    }

    /// Whether `now` falls inside the window.
    #[must_use]
    pub fn contains(&self, now: NaiveTime) -> bool {
        now >= self.open && now < self.close
    }

    /// Window open time (inclusive).
    #[must_use]
    pub fn open(&self) -> NaiveTime {
        self.open
    }

    /// Window close time (exclusive).
    #[must_use]
    pub fn close(&self) -> NaiveTime {
        self.close
    }
}

/// Session state machine.
///
/// Thread-safe: `evaluate` runs on the scheduler task while `is_open` is
/// read concurrently by submit callers. Transitions use an atomic swap so
/// a signal fires exactly once per state change even under concurrent
/// evaluation.
#[derive(Debug)]
pub struct SessionMonitor {
    window: SessionWindow,
    open: AtomicBool,
}

impl SessionMonitor {
    /// Create a monitor in the Closed state.
    #[must_use]
    pub fn new(window: SessionWindow) -> Self {
        Self {
            window,
            open: AtomicBool::new(false),
        }
    }

    /// Whether the session is currently Open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// The configured window.
    #[must_use]
    pub fn window(&self) -> &SessionWindow {
        &self.window
    }

    /// Compare `now` against the window and transition if needed.
    ///
    /// Closed -> Open emits `logon`; Open -> Closed emits `logout`;
    /// otherwise no-op. Invoked once per scheduler cycle.
    pub fn evaluate(&self, now: NaiveTime, sink: &dyn EventSink) {
        let should_be_open = self.window.contains(now);

        if should_be_open {
            // swap returns the previous value, so only the transitioning
            // call observes false here
            if !self.open.swap(true, Ordering::AcqRel) {
                info!(open = %self.window.open, close = %self.window.close, "Market open, sending logon");
                sink.logon();
            }
        } else if self.open.swap(false, Ordering::AcqRel) {
            info!("Market closed, sending logout");
            sink.logout();
        }
    }
}
