//! Pacer gateway entry point.
//!
//! Gates and paces outbound order submissions against a daily trading
//! window and a per-cycle budget.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Order submission gating and pacing gateway
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PACER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Submit a synthetic burst of N New orders at startup (smoke runs)
    #[arg(long)]
    burst: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pacer_telemetry::init_logging()?;

    info!("Starting pacer v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            pacer_gateway::AppConfig::from_file(&path)?
        }
        None => pacer_gateway::AppConfig::load()?,
    };

    let app = pacer_gateway::Application::new(config)?;
    app.run(args.burst).await?;

    Ok(())
}
