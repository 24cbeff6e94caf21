//! Application wiring and lifecycle.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use pacer_core::{OrderId, OrderRequest, Price, Qty};
use pacer_engine::{Dispatcher, EngineConfig, EngineScheduler};
use pacer_telemetry::Metrics;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::sink::TelemetrySink;

/// Backlog depth gauge refresh interval, in scheduler cycles.
const DEPTH_REPORT_CYCLES: u32 = 1;

/// The running gateway: engine plus scheduler.
pub struct Application {
    config: AppConfig,
    engine_config: EngineConfig,
    dispatcher: Arc<Dispatcher>,
}

impl Application {
    /// Wire the engine from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let engine_config = config.engine_config()?;
        let sink = Arc::new(TelemetrySink::new());
        let dispatcher = Arc::new(Dispatcher::new(&engine_config, sink)?);

        Ok(Self {
            config,
            engine_config,
            dispatcher,
        })
    }

    /// Shared handle for callers submitting orders and responses.
    #[must_use]
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Run until ctrl_c.
    ///
    /// Starts the scheduler, optionally replays a synthetic burst of New
    /// orders for smoke runs, then waits for the shutdown signal.
    pub async fn run(self, burst_override: Option<u32>) -> AppResult<()> {
        info!(
            open = %self.engine_config.open,
            close = %self.engine_config.close,
            limit = self.engine_config.max_orders_per_cycle,
            cycle_ms = self.engine_config.cycle.as_millis() as u64,
            "Starting pacer gateway"
        );

        let scheduler =
            EngineScheduler::start(Arc::clone(&self.dispatcher), self.engine_config.cycle);

        let burst = burst_override.unwrap_or(self.config.simulation.burst);
        if burst > 0 {
            self.run_burst(burst);
        }

        // Periodic backlog depth reporting rides on a third, local ticker;
        // the engine itself stays unaware of metrics.
        let depth_dispatcher = Arc::clone(&self.dispatcher);
        let depth_interval = self.engine_config.cycle * DEPTH_REPORT_CYCLES;
        let depth_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(depth_interval);
            loop {
                ticker.tick().await;
                Metrics::backlog_depth(depth_dispatcher.backlog_depth());
            }
        });

        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received");

        depth_task.abort();
        scheduler.shutdown().await;

        info!(
            backlog = self.dispatcher.backlog_depth(),
            pending_responses = self.dispatcher.pending_responses(),
            "Gateway stopped"
        );
        Ok(())
    }

    /// Submit `burst` synthetic New orders in immediate succession.
    fn run_burst(&self, burst: u32) {
        info!(burst, "Submitting synthetic order burst");
        let mut sent = 0u32;
        let mut queued = 0u32;
        let mut rejected = 0u32;

        for id in 1..=u64::from(burst) {
            let order = OrderRequest::new_order(
                OrderId::new(id),
                Price::new(Decimal::from(100)),
                Qty::new(Decimal::ONE),
            );
            let outcome = self.dispatcher.submit(order);
            if outcome.is_sent() {
                sent += 1;
            } else if outcome.is_queued() {
                queued += 1;
            } else {
                rejected += 1;
            }
        }

        info!(sent, queued, rejected, "Burst complete");
    }
}
