//! MACD trend-following strategy.
//!
//! Buys when the MACD line crosses above its signal line and sells on the
//! opposite crossover.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    error::StrategyError,
    traits::{MultiOutputIndicator, Strategy, StrategyConfig, StrategyParams},
    types::{BarSeries, ParameterType, Signal, SignalStrength, SignalType, StrategyParameter, Timeframe},
};
use trading_indicators::Macd;

use crate::base::{check_warmup, parse_params, whole_number};

/// Configuration for the MACD strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    #[serde(deserialize_with = "whole_number")]
    pub fast_period: usize,
    #[serde(deserialize_with = "whole_number")]
    pub slow_period: usize,
    #[serde(deserialize_with = "whole_number")]
    pub signal_period: usize,
    pub quantity: f64,
    pub timeframe: Timeframe,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            quantity: 0.0,
            timeframe: Timeframe::Daily,
        }
    }
}

impl StrategyConfig for MacdConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_period == 0 || self.slow_period == 0 || self.signal_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.fast_period >= self.slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be less than slow period".into(),
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

/// MACD trend follower.
#[derive(Debug, Clone, Default)]
pub struct MacdTrendStrategy {
    config: MacdConfig,
}

impl MacdTrendStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MacdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MacdConfig {
        &self.config
    }

    /// Strength from the histogram size relative to price.
    fn classify_strength(histogram: f64, price: f64) -> SignalStrength {
        if price == 0.0 {
            return SignalStrength::Weak;
        }
        let relative = (histogram / price).abs();
        if relative >= 0.005 {
            SignalStrength::Strong
        } else if relative >= 0.002 {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }
}

impl Strategy for MacdTrendStrategy {
    fn name(&self) -> &str {
        "macd_trend"
    }

    fn description(&self) -> &str {
        "Follows trends using MACD and signal line crossovers"
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
        let points = Macd::with_periods(
            self.config.fast_period,
            self.config.slow_period,
            self.config.signal_period,
        )
        .calculate(&closes);
        let last = closes.len() - 1;
        let bar = series.bars()[last];

        let hold = Signal::hold(&series.symbol, self.name(), "no MACD crossover")
            .at(bar.close, bar.timestamp)
            .with_quantity(self.config.quantity);

        let (Some((prev_macd, prev_signal)), Some((curr_macd, curr_signal))) =
            (points[last - 1].lines(), points[last].lines())
        else {
            return Signal {
                reason: "MACD not ready".into(),
                ..hold
            };
        };

        debug!(
            symbol = %series.symbol,
            macd = curr_macd,
            signal = curr_signal,
            "MACD computed"
        );

        let strength = Self::classify_strength(curr_macd - curr_signal, bar.close);

        if prev_macd <= prev_signal && curr_macd > curr_signal {
            Signal {
                reason: format!(
                    "MACD ({:.4}) crossed above signal line ({:.4})",
                    curr_macd, curr_signal
                ),
                ..hold.with_action(SignalType::Buy, strength)
            }
        } else if prev_macd >= prev_signal && curr_macd < curr_signal {
            Signal {
                reason: format!(
                    "MACD ({:.4}) crossed below signal line ({:.4})",
                    curr_macd, curr_signal
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
        let defaults = MacdConfig::default();
        vec![
            StrategyParameter::new("fast_period", ParameterType::Integer, defaults.fast_period, "Fast EMA period")
                .with_range(1, 100),
            StrategyParameter::new("slow_period", ParameterType::Integer, defaults.slow_period, "Slow EMA period")
                .with_range(2, 200),
            StrategyParameter::new(
                "signal_period",
                ParameterType::Integer,
                defaults.signal_period,
                "Signal line EMA period",
            )
            .with_range(1, 50),
            StrategyParameter::new(
                "quantity",
                ParameterType::Float,
                defaults.quantity,
                "Suggested order quantity, 0 leaves sizing to the executor",
            ),
        ]
    }

    fn min_bars(&self) -> usize {
        (self.config.slow_period + self.config.signal_period).max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trading_core::types::Bar;

    fn create_test_series(prices: &[f64]) -> BarSeries {
        let bars = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Bar::from_close(i as i64 * 86400000, price))
            .collect();
        BarSeries::from_bars("TEST", Timeframe::Daily, bars)
    }

    fn strategy() -> MacdTrendStrategy {
        MacdTrendStrategy::with_config(MacdConfig {
            fast_period: 2,
            slow_period: 3,
            signal_period: 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_bullish_crossover() {
        // Accelerating decline, then a rebound
        let signal = strategy().on_data(&create_test_series(&[20.0, 19.0, 17.0, 14.0, 10.0, 5.0, 12.0]));
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.strength, SignalStrength::Strong);
        assert_eq!(signal.price, 12.0);
    }

    #[test]
    fn test_bearish_crossover() {
        let signal = strategy().on_data(&create_test_series(&[5.0, 6.0, 8.0, 11.0, 15.0, 20.0, 13.0]));
        assert_eq!(signal.signal_type, SignalType::Sell);
    }

    #[test]
    fn test_flat_series_holds() {
        let signal = strategy().on_data(&create_test_series(&[100.0; 7]));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert_eq!(signal.reason, "no MACD crossover");
    }

    #[test]
    fn test_min_bars() {
        let s = strategy();
        assert_eq!(s.min_bars(), 5);
        assert_eq!(MacdTrendStrategy::new().min_bars(), 35);

        let signal = s.on_data(&create_test_series(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert!(signal.reason.contains("need 5 bars"));
    }

    #[test]
    fn test_config_validation() {
        assert!(MacdConfig::default().validate().is_ok());
        let config = MacdConfig {
            fast_period: 26,
            slow_period: 12,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
