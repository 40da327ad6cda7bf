//! Market data provider abstraction.
//!
//! Data acquisition lives outside the signal core; strategies only ever see
//! a [`BarSeries`](crate::types::BarSeries) built from what a provider returns.

use crate::error::DataError;
use crate::types::{Bar, Ticker, Timeframe};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of historical and latest market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the data source name.
    fn name(&self) -> &str;

    /// Fetch historical bars.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    /// * `timeframe` - The bar interval
    ///
    /// # Returns
    /// Bars ordered from oldest to newest
    async fn get_historical_data(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timeframe: Timeframe,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the most recent traded price.
    async fn get_latest_price(&self, symbol: &str) -> Result<f64, DataError>;

    /// Get the latest quote summary.
    async fn get_ticker(&self, symbol: &str) -> Result<Ticker, DataError>;
}
