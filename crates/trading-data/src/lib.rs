//! Reference collaborators for the signal core: a CSV market data provider
//! and an in-memory order store.

mod cache;
mod csv_source;
mod order_store;

pub use cache::DataCache;
pub use csv_source::{load_bars, CsvDataSource};
pub use order_store::MemoryOrderStore;

use std::path::Path;

use trading_core::error::DataError;
use trading_core::types::{BarSeries, Timeframe};

/// Load a CSV file into a series for `symbol`.
pub async fn load_csv(
    path: impl AsRef<Path>,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<BarSeries, DataError> {
    let bars = load_bars(path.as_ref()).await?;
    Ok(BarSeries::from_bars(symbol, timeframe, bars))
}
