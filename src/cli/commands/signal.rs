//! Signal command implementation.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::info;
use trading_config::AppConfig;
use trading_core::traits::{MarketDataProvider, StrategyParams};
use trading_core::types::{BarSeries, Timeframe};
use trading_data::{load_csv, CsvDataSource};
use trading_strategies::StrategyFactory;

use crate::cli::{OutputFormat, SignalArgs};

pub async fn run(args: SignalArgs, config: &AppConfig) -> Result<()> {
    info!("Evaluating strategy {} on {}", args.strategy, args.symbol);

    let params = match &args.params {
        Some(raw) => parse_params(raw)?,
        None => config.strategy_params(&args.strategy),
    };
    let strategy = StrategyFactory::create_with_params(&args.strategy, &params)
        .context("Failed to create strategy")?;

    let series = load_series(&args, strategy.timeframe()).await?;
    info!(bars = series.len(), "loaded price data");

    let signal = strategy.on_data(&series);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&signal)?),
        OutputFormat::Text => {
            println!("{} {} ({:?})", signal.symbol, signal.signal_type, signal.strength);
            println!("  Strategy:    {}", signal.strategy);
            println!("  Price:       {:.2}", signal.price);
            if signal.quantity > 0.0 {
                println!("  Quantity:    {}", signal.quantity);
            }
            if let Some(stop) = signal.stop_loss {
                println!("  Stop loss:   {:.2}", stop);
            }
            if let Some(target) = signal.take_profit {
                println!("  Take profit: {:.2}", target);
            }
            println!("  Reason:      {}", signal.reason);
        }
    }

    Ok(())
}

fn parse_params(raw: &str) -> Result<StrategyParams> {
    let value: serde_json::Value = serde_json::from_str(raw).context("--params must be valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!("--params must be a JSON object, got {}", other),
    }
}

async fn load_series(
    args: &SignalArgs,
    timeframe: Timeframe,
) -> Result<BarSeries> {
    if !args.data.exists() {
        bail!(
            "Data path '{}' does not exist. Provide a CSV file or a directory containing <SYMBOL>.csv",
            args.data.display()
        );
    }

    if args.data.is_dir() {
        let source = CsvDataSource::new(&args.data)?;
        let start = match &args.start {
            Some(date) => parse_date(date, false)?,
            None => DateTime::<Utc>::MIN_UTC,
        };
        let end = match &args.end {
            Some(date) => parse_date(date, true)?,
            None => DateTime::<Utc>::MAX_UTC,
        };
        let bars = source
            .get_historical_data(&args.symbol, start, end, timeframe)
            .await
            .with_context(|| format!("Failed to load {} from {}", args.symbol, source.name()))?;
        Ok(BarSeries::from_bars(&args.symbol, timeframe, bars))
    } else {
        load_csv(&args.data, &args.symbol, timeframe)
            .await
            .with_context(|| format!("Failed to read {}", args.data.display()))
    }
}

/// Start of the given day, or its last millisecond when `end_of_day`.
fn parse_date(date: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
    } else {
        NaiveTime::MIN
    };
    Ok(day.and_time(time).and_utc())
}
