//! RSI-based Trading Strategy.
//!
//! Trades based on RSI overbought/oversold conditions.
//! Buys while RSI sits below the oversold level,
//! sells while RSI sits above the overbought level.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig, StrategyParams},
    types::{BarSeries, ParameterType, Signal, SignalStrength, SignalType, StrategyParameter, Timeframe},
};
use trading_indicators::Rsi;

use crate::base::{check_warmup, parse_params, whole_number};

/// Configuration for the RSI strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    /// RSI calculation period
    #[serde(deserialize_with = "whole_number")]
    pub period: usize,
    /// Overbought threshold (sell above this)
    pub overbought: f64,
    /// Oversold threshold (buy below this)
    pub oversold: f64,
    pub quantity: f64,
    pub timeframe: Timeframe,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
            quantity: 0.0,
            timeframe: Timeframe::Daily,
        }
    }
}

impl StrategyConfig for RsiConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period == 0 {
            return Err(StrategyError::InvalidConfig(
                "RSI period must be greater than 0".into(),
            ));
        }
        if self.overbought <= self.oversold {
            return Err(StrategyError::InvalidConfig(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
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

/// RSI momentum strategy.
#[derive(Debug, Clone, Default)]
pub struct RsiMomentumStrategy {
    config: RsiConfig,
}

impl RsiMomentumStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RsiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RsiConfig {
        &self.config
    }

    fn classify_strength(rsi: f64) -> SignalStrength {
        if rsi <= 20.0 || rsi >= 80.0 {
            SignalStrength::Strong
        } else if rsi <= 30.0 || rsi >= 70.0 {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }
}

impl Strategy for RsiMomentumStrategy {
    fn name(&self) -> &str {
        "rsi_momentum"
    }

    fn description(&self) -> &str {
        "Trades RSI overbought/oversold conditions"
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
        let rsi_values = Rsi::new(self.config.period).calculate(&closes);
        let bar = series.bars()[closes.len() - 1];

        let hold = Signal::hold(&series.symbol, self.name(), "RSI within thresholds")
            .at(bar.close, bar.timestamp)
            .with_quantity(self.config.quantity);

        let Some(current_rsi) = rsi_values.last().copied().flatten() else {
            return Signal {
                reason: "RSI not ready".into(),
                ..hold
            };
        };

        debug!(symbol = %series.symbol, rsi = current_rsi, "RSI computed");

        let strength = Self::classify_strength(current_rsi);
        if current_rsi < self.config.oversold {
            Signal {
                reason: format!(
                    "RSI ({:.1}) below oversold level ({:.1})",
                    current_rsi, self.config.oversold
                ),
                ..hold.with_action(SignalType::Buy, strength)
            }
        } else if current_rsi > self.config.overbought {
            Signal {
                reason: format!(
                    "RSI ({:.1}) above overbought level ({:.1})",
                    current_rsi, self.config.overbought
                ),
                ..hold.with_action(SignalType::Sell, strength)
            }
        } else {
            Signal {
                reason: format!("RSI ({:.1}) within thresholds", current_rsi),
                ..hold
            }
        }
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn parameters(&self) -> Vec<StrategyParameter> {
        let defaults = RsiConfig::default();
        vec![
            StrategyParameter::new("period", ParameterType::Integer, defaults.period, "RSI lookback period")
                .with_range(2, 100),
            StrategyParameter::new(
                "overbought",
                ParameterType::Float,
                defaults.overbought,
                "Sell when RSI is above this level",
            )
            .with_range(50.0, 100.0),
            StrategyParameter::new(
                "oversold",
                ParameterType::Float,
                defaults.oversold,
                "Buy when RSI is below this level",
            )
            .with_range(0.0, 50.0),
            StrategyParameter::new(
                "quantity",
                ParameterType::Float,
                defaults.quantity,
                "Suggested order quantity, 0 leaves sizing to the executor",
            ),
        ]
    }

    fn min_bars(&self) -> usize {
        self.config.period + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trading_core::types::Bar;

    fn create_test_series(prices: &[f64]) -> BarSeries {
        let mut series = BarSeries::new("TEST", Timeframe::Daily);
        for (i, &price) in prices.iter().enumerate() {
            series.push(Bar::new(
                i as i64 * 86400000,
                price,
                price + 1.0,
                price - 1.0,
                price,
                1000.0,
            ));
        }
        series
    }

    fn strategy(period: usize) -> RsiMomentumStrategy {
        RsiMomentumStrategy::with_config(RsiConfig {
            period,
            ..Default::default()
        })
    }

    #[test]
    fn test_config_validation() {
        let mut config = RsiConfig::default();
        assert!(config.validate().is_ok());

        config.overbought = 30.0;
        config.oversold = 70.0;
        assert!(config.validate().is_err());

        let config = RsiConfig {
            period: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversold_buy() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        let signal = strategy(5).on_data(&create_test_series(&prices));

        // Strictly falling prices drive RSI to 0
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.strength, SignalStrength::Strong);
        assert_eq!(signal.price, 91.0);
    }

    #[test]
    fn test_overbought_sell() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let signal = strategy(5).on_data(&create_test_series(&prices));
        assert_eq!(signal.signal_type, SignalType::Sell);
        assert_eq!(signal.strength, SignalStrength::Strong);
    }

    #[test]
    fn test_neutral_holds() {
        let prices = [100.0, 101.0, 100.0, 101.0, 100.0, 101.0, 100.0];
        let signal = strategy(4).on_data(&create_test_series(&prices));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert!(signal.reason.contains("within thresholds"));
    }

    #[test]
    fn test_insufficient_data_holds() {
        let signal = strategy(5).on_data(&create_test_series(&[100.0, 99.0, 98.0, 97.0, 96.0]));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert_eq!(signal.reason, "insufficient data: need 6 bars, have 5");
    }

    #[test]
    fn test_signal_strength() {
        assert_eq!(RsiMomentumStrategy::classify_strength(15.0), SignalStrength::Strong);
        assert_eq!(RsiMomentumStrategy::classify_strength(25.0), SignalStrength::Moderate);
        assert_eq!(RsiMomentumStrategy::classify_strength(50.0), SignalStrength::Weak);
        assert_eq!(RsiMomentumStrategy::classify_strength(75.0), SignalStrength::Moderate);
        assert_eq!(RsiMomentumStrategy::classify_strength(85.0), SignalStrength::Strong);
    }

    #[test]
    fn test_init_keeps_defaults() {
        let mut s = RsiMomentumStrategy::new();
        s.init(json!({"oversold": 25}).as_object().unwrap()).unwrap();
        assert_eq!(s.config().period, 14);
        assert_eq!(s.config().oversold, 25.0);
        assert_eq!(s.config().overbought, 70.0);
        assert_eq!(s.min_bars(), 15);
    }
}
