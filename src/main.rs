//! Signal and analytics CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use trading_config::load_config_or_default;
use trading_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config_or_default(cli.config.as_deref());

    // Setup logging; command line flags win over the configuration file
    let (config_level, config_json) = match &loaded {
        Ok(config) => (config.logging.level.clone(), config.logging.is_json()),
        Err(_) => ("info".to_string(), false),
    };
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or(config_level);
    let format = if cli.json_logs || config_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    setup_logging(&level, format)?;

    // Execute command
    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(cli.config.as_deref(), loaded).await;
    }

    let config = loaded.context("Failed to load configuration")?;
    match cli.command {
        Commands::Strategies { output } => cli::commands::strategies::run(output).await,
        Commands::Signal(args) => cli::commands::signal::run(args, &config).await,
        Commands::Indicator(args) => cli::commands::indicator::run(args).await,
        Commands::Metrics(args) => cli::commands::metrics::run(args, &config).await,
        Commands::ValidateConfig => Ok(()),
    }
}
