//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio valuation, benchmark comparison and signal analysis")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

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

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// `{success, data | error}` JSON envelope
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Value a portfolio against current quotes
    Value(ValueArgs),
    /// Aggregate trading signals into recommendations
    Signals(SignalsArgs),
    /// Compare portfolio return against benchmark holdings
    Benchmark(BenchmarkArgs),
    /// Validate an order and check it against buying power
    Order(OrderArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Where the portfolio and its prices come from.
#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Positions CSV (symbol, quantity, average_cost)
    #[arg(short, long)]
    pub positions: PathBuf,

    /// Quotes CSV (symbol, current, open, high, low, previous_close)
    #[arg(short, long)]
    pub quotes: PathBuf,

    /// Account identifier (defaults to the configured account)
    #[arg(long)]
    pub account: Option<String>,

    /// Cash balance (defaults to the configured cash)
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Buying power (defaults to the configured buying power, then cash)
    #[arg(long)]
    pub buying_power: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct ValueArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Signals JSON file (array of signals)
    #[arg(short, long)]
    pub signals: PathBuf,

    /// Symbols to analyze (comma-separated); defaults to every symbol in the file
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Include the market sentiment summary
    #[arg(long)]
    pub sentiment: bool,
}

#[derive(clap::Args)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Initial capital (defaults to the configured initial capital)
    #[arg(long)]
    pub initial_capital: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct OrderArgs {
    /// Order JSON file
    #[arg(long)]
    pub order: PathBuf,

    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Reference price for market and stop orders (defaults to the quoted price)
    #[arg(long)]
    pub market_price: Option<Decimal>,

    /// Do not check buying power for sell orders
    #[arg(long)]
    pub sells_exempt: bool,
}
