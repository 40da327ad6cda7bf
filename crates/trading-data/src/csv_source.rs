//! CSV market data provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;
use trading_core::error::DataError;
use trading_core::traits::MarketDataProvider;
use trading_core::types::{Bar, Ticker, Timeframe};

use crate::DataCache;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Historical data read from `<dir>/<SYMBOL>.csv` files.
///
/// Each file holds bars of a single interval; the requested timeframe is
/// not resampled. Parsed files are cached for the lifetime of the source.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
    cache: DataCache,
}

impl CsvDataSource {
    /// Create a data source over a directory of CSV files.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            dir,
            cache: DataCache::new(),
        })
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol))
    }

    /// Load all bars for a symbol, oldest first.
    pub async fn load_all(&self, symbol: &str) -> Result<std::sync::Arc<Vec<Bar>>, DataError> {
        if let Some(bars) = self.cache.get(symbol).await {
            return Ok(bars);
        }

        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        let bars = load_bars(&path).await?;
        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded CSV data");
        Ok(self.cache.put(symbol, bars).await)
    }
}

#[async_trait]
impl MarketDataProvider for CsvDataSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn get_historical_data(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timeframe: Timeframe,
    ) -> Result<Vec<Bar>, DataError> {
        let all = self.load_all(symbol).await?;
        let (start_ms, end_ms) = (start.timestamp_millis(), end.timestamp_millis());

        let bars: Vec<Bar> = all
            .iter()
            .filter(|b| b.timestamp >= start_ms && b.timestamp <= end_ms)
            .copied()
            .collect();

        debug!(symbol, %timeframe, bars = bars.len(), "historical data selected");

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(bars)
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<f64, DataError> {
        let all = self.load_all(symbol).await?;
        all.last().map(|b| b.close).ok_or(DataError::NoDataAvailable)
    }

    async fn get_ticker(&self, symbol: &str) -> Result<Ticker, DataError> {
        let all = self.load_all(symbol).await?;
        let bar = all.last().ok_or(DataError::NoDataAvailable)?;

        // Files carry no quotes, so bid and ask collapse to the close
        Ok(Ticker {
            symbol: symbol.to_string(),
            last: bar.close,
            bid: bar.close,
            ask: bar.close,
            volume: bar.volume,
            timestamp: bar.timestamp,
        })
    }
}

/// Load bars from a CSV file, sorted by timestamp.
pub async fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let content = tokio::fs::read(path).await?;
    parse_bars(&content)
}

fn parse_bars(content: &[u8]) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut bars = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let timestamp = parse_timestamp(&record.date)?;

        bars.push(Bar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    // Sort by timestamp
    bars.sort_by_key(|b| b.timestamp);

    Ok(bars)
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
