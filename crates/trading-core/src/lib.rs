//! Core types and traits shared by the indicator, strategy and metrics crates.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Ticker)
//! - Trading signals and strategy parameter metadata
//! - Order and position types consumed by the metrics engine
//! - Core traits for strategies, indicators and external collaborators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{TradingError, TradingResult};
pub use types::*;
pub use traits::*;
