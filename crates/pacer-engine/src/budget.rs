//! Per-cycle submission budget.
//!
//! Counts sends performed in the current cycle and caps them at a
//! configured limit shared by immediate dispatch and backlog drains.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{EngineError, Result};

/// Thread-safe per-cycle send counter.
///
/// `try_acquire` performs the limit check and the increment as a single
/// atomic step via a CAS loop, so concurrent immediate sends and a
/// concurrent drain can never double-count or race past the limit.
#[derive(Debug)]
pub struct SubmissionBudget {
    used: AtomicU32,
    limit: u32,
}

impl SubmissionBudget {
    /// Create a budget with the given per-cycle limit.
    pub fn new(limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(EngineError::InvalidLimit(
                "per-cycle limit must be positive".to_string(),
            ));
        }
        Ok(Self {
            used: AtomicU32::new(0),
            limit,
        })
    }

    /// Sends performed since the last reset.
    #[must_use]
    pub fn used(&self) -> u32 {
        self.used.load(Ordering::Acquire)
    }

    /// The configured per-cycle limit.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Claim one send slot.
    ///
    /// # Returns
    /// - `true` if a slot was claimed (counter incremented)
    /// - `false` if the budget for this cycle is exhausted
    pub fn try_acquire(&self) -> bool {
        loop {
            let current = self.used.load(Ordering::Acquire);
            if current >= self.limit {
                return false;
            }

            match self.used.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(_) => continue, // Retry on contention
            }
        }
    }

    /// Reset the counter to zero at a cycle boundary.
    ///
    /// Called exactly once per cycle, by the drain, before any draining.
    pub fn reset(&self) {
        self.used.store(0, Ordering::Release);
    }
}
