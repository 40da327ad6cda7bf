//! Helpers shared by every strategy: typed parameter parsing, warm-up
//! checks and strength classification.

use chrono::NaiveTime;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::{Number, Value};
use trading_core::{
    error::StrategyError,
    traits::{Strategy, StrategyParams},
    types::{BarSeries, Signal, SignalStrength},
};

/// Build a typed config from a parameter dictionary.
///
/// The config type is expected to use `#[serde(default)]`, so missing keys
/// keep their defaults; unknown keys are ignored.
pub fn parse_params<T: DeserializeOwned>(params: &StrategyParams) -> Result<T, StrategyError> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| StrategyError::InvalidConfig(e.to_string()))
}

/// Deserialize a count that may arrive as `14` or `14.0`.
///
/// Fractional or negative values are rejected rather than truncated.
pub fn whole_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return usize::try_from(n).map_err(D::Error::custom);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as usize),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            number
        ))),
    }
}

/// Deserialize a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn clock_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid time of day: {}", raw)))
}

/// Serialize a wall-clock time as `HH:MM`.
pub fn serialize_clock_time<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Hold signal for a series that cannot be evaluated yet.
///
/// Returns `None` once `strategy` is warmed up on the series.
pub fn check_warmup<S: Strategy + ?Sized>(strategy: &S, series: &BarSeries) -> Option<Signal> {
    let Some(bar) = series.last() else {
        return Some(Signal::hold(&series.symbol, strategy.name(), "no price data"));
    };
    if !strategy.is_warmed_up(series.len()) {
        return Some(
            Signal::hold(
                &series.symbol,
                strategy.name(),
                format!(
                    "insufficient data: need {} bars, have {}",
                    strategy.min_bars(),
                    series.len()
                ),
            )
            .at(bar.close, bar.timestamp),
        );
    }
    None
}

/// Classify how far apart two crossing lines are, relative to `reference`.
pub fn strength_from_separation(a: f64, b: f64, reference: f64) -> SignalStrength {
    let magnitude = if reference != 0.0 {
        ((a - b) / reference).abs()
    } else {
        0.0
    };

    if magnitude > 0.02 {
        SignalStrength::Strong
    } else if magnitude > 0.01 {
        SignalStrength::Moderate
    } else {
        SignalStrength::Weak
    }
}
