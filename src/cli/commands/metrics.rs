//! Metrics command implementation.

use anyhow::{Context, Result};
use tracing::info;
use trading_config::AppConfig;
use trading_core::traits::OrderStore;
use trading_data::MemoryOrderStore;
use trading_metrics::PerformanceReport;

use crate::cli::{MetricsArgs, OutputFormat};

pub async fn run(args: MetricsArgs, config: &AppConfig) -> Result<()> {
    let store = MemoryOrderStore::from_json_file(&args.orders)
        .await
        .with_context(|| format!("Failed to load orders from {}", args.orders.display()))?;
    let orders = store.list().await?;

    let balance = args.balance.unwrap_or(config.metrics.initial_balance);
    info!(orders = orders.len(), %balance, "computing performance metrics");

    let report = PerformanceReport::from_orders(&orders, balance);

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    Ok(())
}
