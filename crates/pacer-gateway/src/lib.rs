//! Gateway wiring for the pacer engine.
//!
//! Loads configuration, installs the telemetry event sink, starts the
//! scheduler and handles shutdown. The transport to the venue is out of
//! scope; outbound effects surface as structured log lines and metrics.

pub mod app;
pub mod config;
pub mod error;
pub mod sink;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use sink::TelemetrySink;
