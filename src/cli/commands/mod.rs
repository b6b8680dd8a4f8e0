//! CLI command implementations.

pub mod benchmark;
pub mod order;
pub mod signals;
pub mod validate;
pub mod value;

use anyhow::{Context, Result};
use folio_config::AppConfig;
use folio_core::traits::{PortfolioSource, QuoteSource};
use folio_core::types::{ApiError, ApiResponse, Portfolio, PriceMap, Usd};
use folio_data::{CsvPortfolioSource, CsvQuoteSource};
use folio_valuation::{PortfolioValuation, ValuationEngine};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{OutputFormat, PortfolioArgs};

/// A portfolio snapshot together with the quotes for its positions.
pub struct LoadedPortfolio {
    pub portfolio: Portfolio,
    pub quotes: CsvQuoteSource,
    pub prices: PriceMap,
}

/// Load positions and quotes, filling account balances from configuration.
pub async fn load_portfolio(args: &PortfolioArgs, config: &AppConfig) -> Result<LoadedPortfolio> {
    let account_id = args
        .account
        .clone()
        .unwrap_or_else(|| config.account.account_id.clone());
    let cash = args.cash.map(Usd::new).unwrap_or(config.account.cash);
    // Unset buying power falls back to cash
    let buying_power = match args.buying_power {
        Some(bp) => Usd::new(bp),
        None if config.account.buying_power.is_positive() => config.account.buying_power,
        None => cash,
    };

    let source = CsvPortfolioSource::from_path(&args.positions, account_id.clone(), cash, buying_power)
        .with_context(|| format!("Failed to load positions from {}", args.positions.display()))?;
    let portfolio = source.get_portfolio(&account_id).await?;

    let quotes = CsvQuoteSource::from_path(&args.quotes)
        .with_context(|| format!("Failed to load quotes from {}", args.quotes.display()))?;
    let prices = quotes.get_quotes(&portfolio.symbols()).await?;

    info!(
        source = source.name(),
        account = %portfolio.account_id,
        positions = portfolio.position_count(),
        priced = prices.len(),
        "Portfolio loaded"
    );

    Ok(LoadedPortfolio {
        portfolio,
        quotes,
        prices,
    })
}

/// Value a loaded portfolio, reporting an out-of-range result like any
/// other failed command.
pub fn value_loaded(loaded: &LoadedPortfolio, output: OutputFormat) -> Result<PortfolioValuation> {
    match ValuationEngine::new().value(&loaded.portfolio, &loaded.prices) {
        Ok(valuation) => Ok(valuation),
        Err(e) => {
            warn!(code = e.code(), error = %e, "Valuation failed");
            emit_error(output, ApiError::from(&e))?;
            Err(e).context("Valuation failed")
        }
    }
}

/// Print `data` as a JSON envelope or as the given text report.
pub fn emit<T: Serialize>(output: OutputFormat, data: T, text: impl FnOnce(&T) -> String) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", ApiResponse::ok(data).to_json()?),
        OutputFormat::Text => print!("{}", text(&data)),
    }
    Ok(())
}

/// Print an error envelope in JSON mode; text mode leaves reporting to the caller.
pub fn emit_error(output: OutputFormat, error: ApiError) -> Result<()> {
    if output == OutputFormat::Json {
        println!("{}", ApiResponse::<()>::err(error).to_json()?);
    }
    Ok(())
}
