//! Validate configuration command.

use anyhow::{bail, Result};
use std::path::Path;
use trading_config::{AppConfig, ConfigError};
use trading_strategies::StrategyFactory;

pub async fn run(config_path: Option<&Path>, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {}", path.display()),
        None => println!("Validating default configuration"),
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Initial balance: {}", config.metrics.initial_balance);

    let mut failures = 0;
    for (id, params) in &config.strategies {
        match StrategyFactory::create_with_params(id, params) {
            Ok(strategy) => println!("Strategy {}: ok (min {} bars)", id, strategy.min_bars()),
            Err(e) => {
                failures += 1;
                println!("Strategy {}: {}", id, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} strategy configuration(s) invalid", failures);
    }

    println!();
    println!("Configuration is valid!");
    Ok(())
}
