//! Core traits for the trading system.

mod data_source;
mod indicator;
mod order_store;
mod strategy;

pub use data_source::MarketDataProvider;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use order_store::OrderStore;
pub use strategy::{Strategy, StrategyConfig, StrategyParams};
