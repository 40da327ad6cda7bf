//! Mean Reversion Strategy using Bollinger Bands.
//!
//! Buys when price touches the lower band (oversold),
//! sells when price touches the upper band (overbought).

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    error::StrategyError,
    traits::{MultiOutputIndicator, Strategy, StrategyConfig, StrategyParams},
    types::{BarSeries, ParameterType, Signal, SignalStrength, SignalType, StrategyParameter, Timeframe},
};
use trading_indicators::{BollingerBands, BollingerOutput};

use crate::base::{check_warmup, parse_params, whole_number};

/// The lower band is tested before the upper one, so a collapsed band
/// (zero variance window, where both touch) resolves to Buy.
pub const LOWER_BAND_CHECKED_FIRST: bool = true;

/// Fraction of the band width placed beyond the touched band as a stop.
const STOP_BUFFER: f64 = 0.1;

/// Configuration for the Mean Reversion strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversionConfig {
    /// Bollinger Bands period
    #[serde(deserialize_with = "whole_number")]
    pub period: usize,
    /// Bollinger Bands standard deviation multiplier
    pub std_dev: f64,
    pub quantity: f64,
    pub timeframe: Timeframe,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
            quantity: 0.0,
            timeframe: Timeframe::Daily,
        }
    }
}

impl StrategyConfig for MeanReversionConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period == 0 {
            return Err(StrategyError::InvalidConfig(
                "BB period must be greater than 0".into(),
            ));
        }
        if self.std_dev <= 0.0 {
            return Err(StrategyError::InvalidConfig(
                "BB std dev must be positive".into(),
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

/// Mean Reversion Strategy using Bollinger Bands.
#[derive(Debug, Clone, Default)]
pub struct MeanReversionStrategy {
    config: MeanReversionConfig,
}

impl MeanReversionStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MeanReversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeanReversionConfig {
        &self.config
    }

    fn classify_strength(percent_b: f64) -> SignalStrength {
        // More extreme %B = stronger signal
        let distance_from_extreme = if percent_b < 0.5 {
            percent_b
        } else {
            1.0 - percent_b
        };

        if distance_from_extreme < 0.05 {
            SignalStrength::Strong
        } else if distance_from_extreme < 0.15 {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }

    fn buy(&self, hold: Signal, bb: &BollingerOutput) -> Signal {
        Signal {
            reason: format!(
                "Price at or below lower band ({:.2}, %B: {:.2}%), expecting reversion to mean",
                bb.lower,
                bb.percent_b * 100.0
            ),
            ..hold
                .with_action(SignalType::Buy, Self::classify_strength(bb.percent_b))
                .with_exits(bb.lower - bb.width() * STOP_BUFFER, bb.middle)
        }
    }

    fn sell(&self, hold: Signal, bb: &BollingerOutput) -> Signal {
        Signal {
            reason: format!(
                "Price at or above upper band ({:.2}, %B: {:.2}%), expecting reversion to mean",
                bb.upper,
                bb.percent_b * 100.0
            ),
            ..hold
                .with_action(SignalType::Sell, Self::classify_strength(bb.percent_b))
                .with_exits(bb.upper + bb.width() * STOP_BUFFER, bb.middle)
        }
    }
}

impl Strategy for MeanReversionStrategy {
    fn name(&self) -> &str {
        "bollinger_mean_reversion"
    }

    fn description(&self) -> &str {
        "Trades reversions to the mean using Bollinger Bands"
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
        let bands = BollingerBands::with_params(self.config.period, self.config.std_dev)
            .calculate(&closes);
        let bar = series.bars()[closes.len() - 1];

        let hold = Signal::hold(&series.symbol, self.name(), "price inside the bands")
            .at(bar.close, bar.timestamp)
            .with_quantity(self.config.quantity);

        let Some(bb) = bands.last().copied().flatten() else {
            return Signal {
                reason: "Bollinger Bands not ready".into(),
                ..hold
            };
        };

        debug!(
            symbol = %series.symbol,
            upper = bb.upper,
            middle = bb.middle,
            lower = bb.lower,
            percent_b = bb.percent_b,
            "Bollinger Bands computed"
        );

        let at_lower = bb.touches_lower(bar.close);
        let at_upper = bb.touches_upper(bar.close);

        match (at_lower, at_upper) {
            (true, true) if LOWER_BAND_CHECKED_FIRST => self.buy(hold, &bb),
            (true, true) => self.sell(hold, &bb),
            (true, false) => self.buy(hold, &bb),
            (false, true) => self.sell(hold, &bb),
            (false, false) => hold,
        }
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn parameters(&self) -> Vec<StrategyParameter> {
        let defaults = MeanReversionConfig::default();
        vec![
            StrategyParameter::new("period", ParameterType::Integer, defaults.period, "Bollinger Bands period")
                .with_range(2, 200),
            StrategyParameter::new(
                "std_dev",
                ParameterType::Float,
                defaults.std_dev,
                "Band width in standard deviations",
            )
            .with_range(0.5, 5.0),
            StrategyParameter::new(
                "quantity",
                ParameterType::Float,
                defaults.quantity,
                "Suggested order quantity, 0 leaves sizing to the executor",
            ),
        ]
    }

    fn min_bars(&self) -> usize {
        self.config.period
    }
}
