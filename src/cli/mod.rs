//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trading-signals")]
#[command(author, version, about = "Technical indicators, strategy signals and performance metrics")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TRADING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available strategies
    Strategies {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Evaluate a strategy on historical bars
    Signal(SignalArgs),
    /// Print an indicator series
    Indicator(IndicatorArgs),
    /// Compute performance metrics from an order history
    Metrics(MetricsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct SignalArgs {
    /// Strategy to evaluate
    #[arg(short, long)]
    pub strategy: String,

    /// Symbol the data belongs to
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// CSV file, or a directory holding <SYMBOL>.csv
    #[arg(long)]
    pub data: PathBuf,

    /// Strategy parameters as a JSON object, replacing the configured ones
    #[arg(long)]
    pub params: Option<String>,

    /// Start date (YYYY-MM-DD), directory data only
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), directory data only
    #[arg(long)]
    pub end: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IndicatorChoice {
    Sma,
    Ema,
    Stddev,
    Rsi,
    Bollinger,
    Macd,
}

#[derive(clap::Args)]
pub struct IndicatorArgs {
    /// Indicator to compute
    #[arg(short, long, value_enum)]
    pub kind: IndicatorChoice,

    /// CSV file with OHLCV bars
    #[arg(long)]
    pub data: PathBuf,

    /// Lookback period (20 by default, 14 for RSI)
    #[arg(short, long)]
    pub period: Option<usize>,

    /// Bollinger band width in standard deviations
    #[arg(long, default_value_t = 2.0)]
    pub k: f64,

    /// MACD fast period
    #[arg(long, default_value_t = 12)]
    pub fast: usize,

    /// MACD slow period
    #[arg(long, default_value_t = 26)]
    pub slow: usize,

    /// MACD signal period
    #[arg(long, default_value_t = 9)]
    pub signal: usize,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct MetricsArgs {
    /// JSON file holding an array of orders
    #[arg(long)]
    pub orders: PathBuf,

    /// Initial balance, defaults to the configured one
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
