//! Error types for the trading system.
//!
//! Indicators and the metrics engine never fail on data shape; they encode
//! readiness in their return values. The errors below cover configuration
//! mistakes and the market data and order store collaborators.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level trading system error.
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Strategy-specific errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown strategy name '{name}', known strategies: {}", .known.join(", "))]
    UnknownStrategy { name: String, known: Vec<String> },

    #[error("Strategy already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Strategy initialization failed: {0}")]
    InitializationFailed(String),
}

/// Market data provider errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Order store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    OrderNotFound(uuid::Uuid),

    #[error("Order already exists: {0}")]
    DuplicateOrder(uuid::Uuid),
}

/// A fill whose value cannot be represented as a `Decimal`.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Fill of {quantity} @ {price} overflows decimal arithmetic")]
pub struct FillOverflow {
    pub quantity: Decimal,
    pub price: Decimal,
}

/// Result type alias for trading operations.
pub type TradingResult<T> = Result<T, TradingError>;
