//! Benchmark comparison command.

use anyhow::{Context, Result};
use folio_config::AppConfig;
use folio_core::traits::QuoteSource;
use folio_core::types::{Percent, Usd};
use folio_monitor::benchmark_summary;
use folio_valuation::{portfolio_return, BenchmarkComparator, BenchmarkReport};
use serde::Serialize;
use tracing::info;

use super::{emit, load_portfolio, value_loaded};
use crate::cli::{BenchmarkArgs, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BenchmarkOutput {
    total_value: Usd,
    initial_capital: Usd,
    portfolio_return: Percent,
    benchmarks: Vec<BenchmarkReport>,
}

pub async fn run(args: BenchmarkArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let loaded = load_portfolio(&args.portfolio, config).await?;
    let valuation = value_loaded(&loaded, output)?;

    let initial_capital = args
        .initial_capital
        .map(Usd::new)
        .unwrap_or(config.account.initial_capital);
    let portfolio_return = portfolio_return(valuation.total_value, initial_capital)
        .context("Portfolio return is undefined for this initial capital")?;

    let comparator = BenchmarkComparator::new(config.benchmarks.clone());
    let benchmark_prices = loaded.quotes.get_quotes(&comparator.instruments()).await?;
    let benchmarks = comparator.compare(portfolio_return, &benchmark_prices);
    info!(
        portfolio_return = %portfolio_return,
        compared = benchmarks.len(),
        "Benchmark comparison complete"
    );

    emit(
        output,
        BenchmarkOutput {
            total_value: valuation.total_value,
            initial_capital,
            portfolio_return,
            benchmarks,
        },
        |out| benchmark_summary(Some(out.portfolio_return), &out.benchmarks),
    )
}
