//! Time-of-day strategy.
//!
//! Buys at the configured market close and sells at the configured pre-open
//! time, measured in exchange-local civil time. Weekends never trade.

use chrono::{Datelike, NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trading_core::{
    error::StrategyError,
    traits::{Strategy, StrategyConfig, StrategyParams},
    types::{BarSeries, ParameterType, Signal, SignalStrength, SignalType, StrategyParameter, Timeframe},
};

use crate::base::{check_warmup, clock_time, parse_params, serialize_clock_time};

/// Configuration for the time-of-day strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDayConfig {
    /// IANA timezone name of the exchange
    pub timezone: String,
    /// Local time that triggers a buy
    #[serde(deserialize_with = "clock_time", serialize_with = "serialize_clock_time")]
    pub close_time: NaiveTime,
    /// Local time that triggers a sell
    #[serde(deserialize_with = "clock_time", serialize_with = "serialize_clock_time")]
    pub pre_open_time: NaiveTime,
    pub quantity: f64,
    pub timeframe: Timeframe,
}

impl Default for TimeOfDayConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            close_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            pre_open_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap_or(NaiveTime::MIN),
            quantity: 0.0,
            timeframe: Timeframe::Minute1,
        }
    }
}

impl TimeOfDayConfig {
    fn load_timezone(&self) -> Result<Tz, StrategyError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            StrategyError::InitializationFailed(format!(
                "failed to load timezone {}: {}",
                self.timezone, e
            ))
        })
    }
}

impl StrategyConfig for TimeOfDayConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.timezone.parse::<Tz>().is_err() {
            return Err(StrategyError::InvalidConfig(format!(
                "Unknown timezone: {}",
                self.timezone
            )));
        }
        if same_minute(self.close_time, self.pre_open_time) {
            return Err(StrategyError::InvalidConfig(
                "Close time and pre-open time must differ".into(),
            ));
        }
        if self.quantity < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "Quantity must not be negative".into(),
            ));
        }
        Ok(())
    }
}

fn same_minute(a: NaiveTime, b: NaiveTime) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute()
}

/// Time-of-day strategy.
#[derive(Debug, Clone, Default)]
pub struct TimeOfDayStrategy {
    config: TimeOfDayConfig,
    location: Option<Tz>,
}

impl TimeOfDayStrategy {
    /// Create the strategy with the default configuration.
    ///
    /// The timezone is resolved lazily until [`Strategy::init`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TimeOfDayConfig) -> Result<Self, StrategyError> {
        let location = config.load_timezone()?;
        Ok(Self {
            config,
            location: Some(location),
        })
    }

    pub fn config(&self) -> &TimeOfDayConfig {
        &self.config
    }
}

impl Strategy for TimeOfDayStrategy {
    fn name(&self) -> &str {
        "time_of_day"
    }

    fn description(&self) -> &str {
        "Buys at the market close and sells before the next open"
    }

    fn init(&mut self, params: &StrategyParams) -> Result<(), StrategyError> {
        let config: TimeOfDayConfig = parse_params(params)?;
        let location = config.load_timezone()?;
        self.config = config;
        self.location = Some(location);
        Ok(())
    }

    fn validate(&self) -> Result<(), StrategyError> {
        self.config.validate()
    }

    fn on_data(&self, series: &BarSeries) -> Signal {
        if let Some(hold) = check_warmup(self, series) {
            return hold;
        }

        let Some(bar) = series.last() else {
            return Signal::hold(&series.symbol, self.name(), "no price data");
        };
        let hold = Signal::hold(&series.symbol, self.name(), "outside trading times")
            .at(bar.close, bar.timestamp)
            .with_quantity(self.config.quantity);

        let location = match self.location {
            Some(tz) => tz,
            None => match self.config.load_timezone() {
                Ok(tz) => tz,
                Err(e) => {
                    warn!(error = %e, "timezone unavailable");
                    return Signal {
                        reason: e.to_string(),
                        ..hold
                    };
                }
            },
        };

        let Some(utc) = bar.datetime() else {
            return Signal {
                reason: format!("invalid bar timestamp: {}", bar.timestamp),
                ..hold
            };
        };
        let local = utc.with_timezone(&location);

        debug!(symbol = %series.symbol, local_time = %local, "evaluating time of day");

        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return Signal {
                reason: format!("market closed on {}", local.weekday()),
                ..hold
            };
        }

        let now = local.naive_local().time();
        if same_minute(now, self.config.close_time) {
            Signal {
                reason: format!("market close at {}", local.format("%H:%M %Z")),
                ..hold.with_action(SignalType::Buy, SignalStrength::Moderate)
            }
        } else if same_minute(now, self.config.pre_open_time) {
            Signal {
                reason: format!("pre-open at {}", local.format("%H:%M %Z")),
                ..hold.with_action(SignalType::Sell, SignalStrength::Moderate)
            }
        } else {
            hold
        }
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn parameters(&self) -> Vec<StrategyParameter> {
        let defaults = TimeOfDayConfig::default();
        vec![
            StrategyParameter::new(
                "timezone",
                ParameterType::String,
                defaults.timezone,
                "Exchange timezone",
            ),
            StrategyParameter::new(
                "close_time",
                ParameterType::Time,
                defaults.close_time.format("%H:%M").to_string(),
                "Local time to buy",
            ),
            StrategyParameter::new(
                "pre_open_time",
                ParameterType::Time,
                defaults.pre_open_time.format("%H:%M").to_string(),
                "Local time to sell",
            ),
            StrategyParameter::new(
                "quantity",
                ParameterType::Float,
                defaults.quantity,
                "Suggested order quantity, 0 leaves sizing to the executor",
            ),
        ]
    }

    fn min_bars(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use trading_core::types::Bar;

    fn series_at(y: i32, m: u32, d: u32, h: u32, min: u32) -> BarSeries {
        let ts = Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().timestamp_millis();
        BarSeries::from_bars("SPY", Timeframe::Minute1, vec![Bar::from_close(ts, 470.0)])
    }

    fn strategy() -> TimeOfDayStrategy {
        TimeOfDayStrategy::with_config(TimeOfDayConfig::default()).unwrap()
    }

    #[test]
    fn test_buy_at_close_in_winter() {
        // Tuesday 16:00 EST
        let signal = strategy().on_data(&series_at(2024, 1, 16, 21, 0));
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.strength, SignalStrength::Moderate);
        assert_eq!(signal.price, 470.0);
    }

    #[test]
    fn test_buy_at_close_in_summer() {
        // Tuesday 16:00 EDT
        let signal = strategy().on_data(&series_at(2024, 7, 16, 20, 0));
        assert_eq!(signal.signal_type, SignalType::Buy);
    }

    #[test]
    fn test_sell_at_pre_open() {
        // Tuesday 08:30 EST
        let signal = strategy().on_data(&series_at(2024, 1, 16, 13, 30));
        assert_eq!(signal.signal_type, SignalType::Sell);
    }

    #[test]
    fn test_weekend_holds() {
        // Saturday 16:00 EST
        let signal = strategy().on_data(&series_at(2024, 1, 13, 21, 0));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert!(signal.reason.contains("Sat"));
    }

    #[test]
    fn test_other_times_hold() {
        let signal = strategy().on_data(&series_at(2024, 1, 16, 18, 0));
        assert_eq!(signal.signal_type, SignalType::Hold);
    }

    #[test]
    fn test_empty_series_holds() {
        let signal = strategy().on_data(&BarSeries::new("SPY", Timeframe::Minute1));
        assert_eq!(signal.signal_type, SignalType::Hold);
        assert_eq!(signal.reason, "no price data");
    }

    #[test]
    fn test_timezone_loaded_lazily() {
        let s = TimeOfDayStrategy::new();
        assert!(s.location.is_none());
        let signal = s.on_data(&series_at(2024, 1, 16, 21, 0));
        assert_eq!(signal.signal_type, SignalType::Buy);
    }

    #[test]
    fn test_init_with_invalid_timezone_fails() {
        let mut s = TimeOfDayStrategy::new();
        let err = s
            .init(json!({"timezone": "Mars/Olympus_Mons"}).as_object().unwrap())
            .unwrap_err();
        assert!(matches!(err, StrategyError::InitializationFailed(_)));
        assert_eq!(s.config().timezone, "America/New_York");
    }

    #[test]
    fn test_init_custom_times() {
        let mut s = TimeOfDayStrategy::new();
        s.init(json!({"close_time": "15:45", "pre_open_time": "09:00"}).as_object().unwrap())
            .unwrap();
        assert!(s.validate().is_ok());

        // Tuesday 15:45 EST
        let signal = s.on_data(&series_at(2024, 1, 16, 20, 45));
        assert_eq!(signal.signal_type, SignalType::Buy);
    }
}
