//! Core data types for the trading system.

mod ohlcv;
mod order;
mod parameter;
mod position;
mod signal;
mod timeframe;

pub use ohlcv::{Bar, BarSeries, Ticker};
pub use order::{Order, OrderStatus, Side};
pub use parameter::{ParameterType, StrategyParameter};
pub use position::{ClosedLot, Position, POSITION_EPSILON};
pub use signal::{Signal, SignalStrength, SignalType};
pub use timeframe::Timeframe;
