//! Configuration structures.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trading_core::traits::StrategyParams;

use crate::ConfigError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsSettings,
    /// Strategy id to parameter dictionary
    #[serde(default)]
    pub strategies: BTreeMap<String, StrategyParams>,
}

impl AppConfig {
    /// Parameters configured for a strategy, empty when none are set.
    pub fn strategy_params(&self, id: &str) -> StrategyParams {
        self.strategies.get(id).cloned().unwrap_or_default()
    }

    /// Check values the type system cannot.
    ///
    /// Strategy tables are only checked by the strategies themselves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "log format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        if self.metrics.initial_balance <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "metrics.initial_balance must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trading-signals".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Metrics engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsSettings {
    pub initial_balance: Decimal,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            initial_balance: dec!(10000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_from_toml;
    use serde_json::json;

    const SAMPLE: &str = r#"
[app]
name = "signals"

[logging]
level = "debug"
format = "json"

[metrics]
initial_balance = 25000

[strategies.ma_crossover]
short_period = 5
long_period = 20
use_ema = true

[strategies.time_of_day]
close_time = "15:45"
"#;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.metrics.initial_balance, dec!(10000));
        assert!(config.strategies.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let config = config_from_toml(SAMPLE).unwrap();

        assert_eq!(config.app.name, "signals");
        assert_eq!(config.app.environment, "development");
        assert!(config.logging.is_json());
        assert_eq!(config.metrics.initial_balance, dec!(25000));

        let params = config.strategy_params("ma_crossover");
        assert_eq!(params.get("short_period"), Some(&json!(5)));
        assert_eq!(params.get("use_ema"), Some(&json!(true)));
        assert_eq!(
            config.strategy_params("time_of_day").get("close_time"),
            Some(&json!("15:45"))
        );
        assert!(config.strategy_params("rsi_momentum").is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = config_from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.metrics.initial_balance = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[logging]"));
        assert!(rendered.contains("level = \"info\""));
    }
}
