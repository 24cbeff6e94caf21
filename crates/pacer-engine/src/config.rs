//! Engine configuration.

use std::time::Duration;

use chrono::NaiveTime;

use crate::error::{EngineError, Result};

/// Configuration for the throttling engine.
///
/// All values are fixed at construction; there is no runtime reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Daily trading window open time (inclusive).
    pub open: NaiveTime,
    /// Daily trading window close time (exclusive).
    pub close: NaiveTime,
    /// Maximum sends per cycle, shared between immediate sends and drains.
    pub max_orders_per_cycle: u32,
    /// Length of one scheduler cycle.
    pub cycle: Duration,
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.open >= self.close {
            return Err(EngineError::InvalidWindow(format!(
                "open {} must precede close {}",
                self.open, self.close
            )));
        }
        if self.max_orders_per_cycle == 0 {
            return Err(EngineError::InvalidLimit(
                "max_orders_per_cycle must be positive".to_string(),
            ));
        }
        if self.cycle.is_zero() {
            return Err(EngineError::InvalidCycle(
                "cycle length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            close: NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
            max_orders_per_cycle: 100,
            cycle: Duration::from_secs(1),
        }
    }
}
