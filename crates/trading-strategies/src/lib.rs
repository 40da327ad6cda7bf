//! Trading strategy implementations.
//!
//! This crate provides implementations of common trading strategies:
//! - Moving Average Crossover
//! - RSI momentum
//! - Mean Reversion (Bollinger Bands)
//! - MACD trend following
//! - Time-of-day (buy at the close, sell before the open)
//!
//! Strategies are stateless between evaluations: each call to
//! `on_data` recomputes its indicators over the full series.

pub mod base;
mod factory;
mod ma_crossover;
mod macd_trend;
mod mean_reversion;
mod registry;
mod rsi_strategy;
mod time_of_day;

pub use factory::StrategyFactory;
pub use ma_crossover::{MACrossoverConfig, MACrossoverStrategy};
pub use macd_trend::{MacdConfig, MacdTrendStrategy};
pub use mean_reversion::{MeanReversionConfig, MeanReversionStrategy, LOWER_BAND_CHECKED_FIRST};
pub use registry::{StrategyInfo, StrategyRegistry};
pub use rsi_strategy::{RsiConfig, RsiMomentumStrategy};
pub use time_of_day::{TimeOfDayConfig, TimeOfDayStrategy};
