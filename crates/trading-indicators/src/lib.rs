//! Technical indicators over ordered price series.
//!
//! This crate provides batch implementations of common technical indicators:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Standard Deviation, Bollinger Bands)
//!
//! Every indicator returns one entry per input value. The first entries are
//! `None` until enough data has been seen; an invalid period or a series
//! that is too short yields an all-`None` result instead of an error.

pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput, StdDev};

use serde::{Deserialize, Serialize};
use trading_core::traits::{Indicator, MultiOutputIndicator};

/// Indicator selection together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorKind {
    Sma { period: usize },
    Ema { period: usize },
    StdDev { period: usize },
    Rsi { period: usize },
    Bollinger { period: usize, k: f64 },
    Macd { fast: usize, slow: usize, signal: usize },
}

/// Result of [`compute`], shaped by the indicator kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorOutput {
    Values(Vec<Option<f64>>),
    Bands(Vec<Option<BollingerOutput>>),
    Macd(Vec<MacdOutput>),
}

impl IndicatorOutput {
    /// Number of points, always equal to the input length.
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Values(v) => v.len(),
            IndicatorOutput::Bands(v) => v.len(),
            IndicatorOutput::Macd(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first point whose primary value is defined.
    pub fn first_defined(&self) -> Option<usize> {
        match self {
            IndicatorOutput::Values(v) => v.iter().position(Option::is_some),
            IndicatorOutput::Bands(v) => v.iter().position(Option::is_some),
            IndicatorOutput::Macd(v) => v.iter().position(|p| p.macd.is_some()),
        }
    }
}

/// Compute any supported indicator over `series`.
pub fn compute(kind: IndicatorKind, series: &[f64]) -> IndicatorOutput {
    match kind {
        IndicatorKind::Sma { period } => IndicatorOutput::Values(Sma::new(period).calculate(series)),
        IndicatorKind::Ema { period } => IndicatorOutput::Values(Ema::new(period).calculate(series)),
        IndicatorKind::StdDev { period } => {
            IndicatorOutput::Values(StdDev::new(period).calculate(series))
        }
        IndicatorKind::Rsi { period } => IndicatorOutput::Values(Rsi::new(period).calculate(series)),
        IndicatorKind::Bollinger { period, k } => {
            IndicatorOutput::Bands(BollingerBands::with_params(period, k).calculate(series))
        }
        IndicatorKind::Macd { fast, slow, signal } => {
            IndicatorOutput::Macd(Macd::with_periods(fast, slow, signal).calculate(series))
        }
    }
}
