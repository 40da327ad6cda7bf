//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, MetricsSettings};

use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use thiserror::Error;

/// Configuration loading or validation failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

fn environment() -> Environment {
    Environment::with_prefix("TRADING")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Load configuration from an optional file; defaults apply when absent.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::builder().add_source(environment()).build()?;
            Ok(config.try_deserialize()?)
        }
    }
}

/// Parse configuration from TOML text, without environment overrides.
pub fn config_from_toml(content: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(content, FileFormat::Toml))
        .build()?;

    Ok(config.try_deserialize()?)
}
