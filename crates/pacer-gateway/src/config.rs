//! Application configuration.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use pacer_engine::EngineConfig;

/// Trading window configuration. Times are `%H:%M:%S` wall-clock (UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Window open time (inclusive). Default: "10:00:00".
    #[serde(default = "default_open")]
    pub open: String,
    /// Window close time (exclusive). Default: "13:00:00".
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    "10:00:00".to_string()
}

fn default_close() -> String {
    "13:00:00".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

/// Throttle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Maximum sends per cycle. Default: 100.
    #[serde(default = "default_max_orders_per_cycle")]
    pub max_orders_per_cycle: u32,
    /// Cycle length (ms). Default: 1,000 (1 second).
    #[serde(default = "default_cycle_ms")]
    pub cycle_ms: u64,
}

fn default_max_orders_per_cycle() -> u32 {
    100
}

fn default_cycle_ms() -> u64 {
    1_000
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_orders_per_cycle: default_max_orders_per_cycle(),
            cycle_ms: default_cycle_ms(),
        }
    }
}

/// Synthetic burst driver configuration (smoke runs without a caller).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of synthetic New orders to submit at startup. Default: 0 (off).
    #[serde(default)]
    pub burst: u32,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// Path resolution: `PACER_CONFIG` env var > `config/default.toml`.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PACER_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Convert into the engine's validated configuration.
    pub fn engine_config(&self) -> AppResult<EngineConfig> {
        let open = parse_time(&self.session.open)?;
        let close = parse_time(&self.session.close)?;

        let config = EngineConfig {
            open,
            close,
            max_orders_per_cycle: self.throttle.max_orders_per_cycle,
            cycle: Duration::from_millis(self.throttle.cycle_ms),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_time(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .map_err(|e| AppError::Config(format!("Invalid time '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = AppConfig::default().engine_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [session]
            open = "09:30:00"
            close = "16:00:00"

            [throttle]
            max_orders_per_cycle = 50
            cycle_ms = 500

            [simulation]
            burst = 150
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.throttle.max_orders_per_cycle, 50);
        assert_eq!(config.simulation.burst, 150);

        let engine = config.engine_config().unwrap();
        assert_eq!(engine.open, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(engine.cycle, Duration::from_millis(500));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[throttle]\nmax_orders_per_cycle = 10\n").unwrap();
        assert_eq!(config.throttle.max_orders_per_cycle, 10);
        assert_eq!(config.throttle.cycle_ms, 1_000);
        assert_eq!(config.session.open, "10:00:00");
    }

    #[test]
    fn test_bad_time_string_rejected() {
        let config: AppConfig = toml::from_str("[session]\nopen = \"25:99\"\n").unwrap();
        assert!(matches!(
            config.engine_config(),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let toml_str = "[session]\nopen = \"14:00:00\"\nclose = \"09:00:00\"\n";
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.engine_config(),
            Err(AppError::Engine(_))
        ));
    }
}
