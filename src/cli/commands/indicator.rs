//! Indicator command implementation.

use anyhow::{Context, Result};
use trading_core::types::{BarSeries, Timeframe};
use trading_data::load_csv;
use trading_indicators::{compute, IndicatorKind, IndicatorOutput};

use crate::cli::{IndicatorArgs, IndicatorChoice, OutputFormat};

pub async fn run(args: IndicatorArgs) -> Result<()> {
    let kind = indicator_kind(&args);
    let symbol = args
        .data
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("DATA")
        .to_string();

    let series = load_csv(&args.data, &symbol, Timeframe::Daily)
        .await
        .with_context(|| format!("Failed to read {}", args.data.display()))?;

    let output = compute(kind, &series.closes());

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "symbol": symbol,
                "indicator": kind,
                "timestamps": series.iter().map(|b| b.timestamp).collect::<Vec<_>>(),
                "output": output,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => print_table(&series, &output),
    }

    Ok(())
}

fn indicator_kind(args: &IndicatorArgs) -> IndicatorKind {
    let period = args.period.unwrap_or(match args.kind {
        IndicatorChoice::Rsi => 14,
        _ => 20,
    });

    match args.kind {
        IndicatorChoice::Sma => IndicatorKind::Sma { period },
        IndicatorChoice::Ema => IndicatorKind::Ema { period },
        IndicatorChoice::Stddev => IndicatorKind::StdDev { period },
        IndicatorChoice::Rsi => IndicatorKind::Rsi { period },
        IndicatorChoice::Bollinger => IndicatorKind::Bollinger { period, k: args.k },
        IndicatorChoice::Macd => IndicatorKind::Macd {
            fast: args.fast,
            slow: args.slow,
            signal: args.signal,
        },
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

fn print_table(series: &BarSeries, output: &IndicatorOutput) {
    let bars = series.bars();
    match output {
        IndicatorOutput::Values(values) => {
            println!("{:<20} {:>12} {:>14}", "date", "close", "value");
            for (bar, value) in bars.iter().zip(values) {
                println!("{:<20} {:>12.4} {:>14}", date(bar.timestamp), bar.close, cell(*value));
            }
        }
        IndicatorOutput::Bands(bands) => {
            println!(
                "{:<20} {:>12} {:>14} {:>14} {:>14}",
                "date", "close", "upper", "middle", "lower"
            );
            for (bar, band) in bars.iter().zip(bands) {
                println!(
                    "{:<20} {:>12.4} {:>14} {:>14} {:>14}",
                    date(bar.timestamp),
                    bar.close,
                    cell(band.map(|b| b.upper)),
                    cell(band.map(|b| b.middle)),
                    cell(band.map(|b| b.lower)),
                );
            }
        }
        IndicatorOutput::Macd(points) => {
            println!(
                "{:<20} {:>12} {:>14} {:>14} {:>14}",
                "date", "close", "macd", "signal", "histogram"
            );
            for (bar, point) in bars.iter().zip(points) {
                println!(
                    "{:<20} {:>12.4} {:>14} {:>14} {:>14}",
                    date(bar.timestamp),
                    bar.close,
                    cell(point.macd),
                    cell(point.signal),
                    cell(point.histogram),
                );
            }
        }
    }
}

fn date(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
