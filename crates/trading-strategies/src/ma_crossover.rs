//! Moving Average Crossover Strategy.
//!
//! Generates buy signals when the short MA crosses above the long MA,
//! and sell signals when the short MA crosses below the long MA.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig, StrategyParams},
    types::{BarSeries, ParameterType, Signal, SignalType, StrategyParameter, Timeframe},
};
use trading_indicators::{Ema, Sma};

use crate::base::{check_warmup, parse_params, strength_from_separation, whole_number};

/// Configuration for the MA Crossover strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MACrossoverConfig {
    /// Short moving average period
    #[serde(deserialize_with = "whole_number")]
    pub short_period: usize,
    /// Long moving average period
    #[serde(deserialize_with = "whole_number")]
    pub long_period: usize,
    /// Use EMA instead of SMA
    pub use_ema: bool,
    /// Suggested order quantity carried on signals
    pub quantity: f64,
    pub timeframe: Timeframe,
}

impl Default for MACrossoverConfig {
    fn default() -> Self {
        Self {
            short_period: 10,
            long_period: 30,
            use_ema: false,
            quantity: 0.0,
            timeframe: Timeframe::Daily,
        }
    }
}

impl StrategyConfig for MACrossoverConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.short_period == 0 || self.long_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Moving average periods must be greater than 0".into(),
            ));
        }
        if self.short_period >= self.long_period {
            return Err(StrategyError::InvalidConfig(
                "Short period must be less than long period".into(),
            ));
        }
        if self.quantity < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "Quantity must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Moving Average Crossover Strategy.
#[derive(Debug, Clone, Default)]
pub struct MACrossoverStrategy {
    config: MACrossoverConfig,
}

impl MACrossoverStrategy {
    /// Create a strategy with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy with an explicit configuration.
    pub fn with_config(config: MACrossoverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MACrossoverConfig {
        &self.config
    }

    fn calculate_ma(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        if self.config.use_ema {
            Ema::new(period).calculate(closes)
        } else {
            Sma::new(period).calculate(closes)
        }
    }
}

impl Strategy for MACrossoverStrategy {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn description(&self) -> &str {
        "Generates signals when a short moving average crosses a long moving average"
    }

    fn init(&mut self, params: &StrategyParams) -> Result<(), StrategyError> {
        self.config = parse_params(params)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), StrategyError> {
        self.config.validate()
    }

    fn on_data(&self, series: &BarSeries) -> Signal {
        if let Some(hold) = check_warmup(self, series) {
            return hold;
        }

        let closes = series.closes();
        let short = self.calculate_ma(&closes, self.config.short_period);
        let long = self.calculate_ma(&closes, self.config.long_period);
        let last = closes.len() - 1;
        let bar = series.bars()[last];

        let hold = Signal::hold(&series.symbol, self.name(), "no crossover")
            .at(bar.close, bar.timestamp)
            .with_quantity(self.config.quantity);

        let (Some(prev_short), Some(prev_long), Some(curr_short), Some(curr_long)) =
            (short[last - 1], long[last - 1], short[last], long[last])
        else {
            return Signal {
                reason: "moving averages not ready".into(),
                ..hold
            };
        };

        debug!(
            symbol = %series.symbol,
            prev_short, prev_long, curr_short, curr_long,
            "moving averages computed"
        );

        let strength = strength_from_separation(curr_short, curr_long, curr_long);

        // Bullish crossover: short crosses above long
        if prev_short <= prev_long && curr_short > curr_long {
            Signal {
                reason: format!(
                    "Bullish crossover: short MA ({:.2}) crossed above long MA ({:.2})",
                    curr_short, curr_long
                ),
                ..hold.with_action(SignalType::Buy, strength)
            }
        }
        // Bearish crossover: short crosses below long
        else if prev_short >= prev_long && curr_short < curr_long {
            Signal {
                reason: format!(
                    "Bearish crossover: short MA ({:.2}) crossed below long MA ({:.2})",
                    curr_short, curr_long
                ),
                ..hold.with_action(SignalType::Sell, strength)
            }
        } else {
            hold
        }
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn parameters(&self) -> Vec<StrategyParameter> {
        let defaults = MACrossoverConfig::default();
        vec![
            StrategyParameter::new(
                "short_period",
                ParameterType::Integer,
                defaults.short_period,
                "Short moving average period",
            )
            .with_range(1, 200),
            StrategyParameter::new(
                "long_period",
                ParameterType::Integer,
                defaults.long_period,
                "Long moving average period",
            )
            .with_range(2, 500),
            StrategyParameter::new(
                "use_ema",
                ParameterType::Bool,
                defaults.use_ema,
                "Use exponential instead of simple moving averages",
            ),
            StrategyParameter::new(
                "quantity",
                ParameterType::Float,
                defaults.quantity,
                "Suggested order quantity, 0 leaves sizing to the executor",
            ),
        ]
    }

    fn min_bars(&self) -> usize {
        // Crossover needs a previous bar
        (self.config.long_period + 1).max(2)
    }
}
