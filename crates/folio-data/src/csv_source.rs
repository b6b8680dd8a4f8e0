//! CSV-backed quote and portfolio suppliers.

use async_trait::async_trait;
use csv::ReaderBuilder;
use folio_core::error::DataError;
use folio_core::traits::{PortfolioSource, QuoteSource};
use folio_core::types::{Portfolio, Position, PriceMap, Quote, Usd};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::QuoteBook;

/// Quote CSV row. Only `symbol` and `current` are required.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Current", alias = "price", alias = "Price", alias = "last")]
    current: Decimal,
    #[serde(alias = "Open", default)]
    open: Option<Decimal>,
    #[serde(alias = "High", default)]
    high: Option<Decimal>,
    #[serde(alias = "Low", default)]
    low: Option<Decimal>,
    #[serde(
        alias = "previousClose",
        alias = "prev_close",
        alias = "Previous Close",
        alias = "close",
        default
    )]
    previous_close: Option<Decimal>,
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        let current = Usd::new(record.current);
        let or_current = |v: Option<Decimal>| v.map(Usd::new).unwrap_or(current);

        Quote {
            symbol: record.symbol.trim().to_ascii_uppercase(),
            current,
            open: or_current(record.open),
            high: or_current(record.high),
            low: or_current(record.low),
            previous_close: or_current(record.previous_close),
        }
    }
}

/// Position CSV row.
#[derive(Debug, Deserialize)]
struct PositionRecord {
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Quantity", alias = "shares", alias = "Shares")]
    quantity: Decimal,
    #[serde(
        alias = "averageCost",
        alias = "avg_cost",
        alias = "Average Cost",
        alias = "cost"
    )]
    average_cost: Decimal,
}

fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize()
        .map(|result| result.map_err(|e| DataError::ParseError(e.to_string())))
        .collect()
}

/// Quotes loaded from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvQuoteSource {
    book: QuoteBook,
}

impl CsvQuoteSource {
    /// Parse quotes from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let records: Vec<QuoteRecord> = read_records(reader)?;
        let book: QuoteBook = records.into_iter().map(Quote::from).collect();
        debug!(quotes = book.len(), "Loaded quotes from CSV");
        Ok(Self { book })
    }

    /// Load quotes from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_reader(crate::open(path)?)
    }

    pub fn book(&self) -> &QuoteBook {
        &self.book
    }

    /// Every quote in the file.
    pub fn all(&self) -> PriceMap {
        self.book.to_price_map()
    }
}

#[async_trait]
impl QuoteSource for CsvQuoteSource {
    async fn get_quotes(&self, symbols: &[String]) -> Result<PriceMap, DataError> {
        Ok(self.book.prices_for(symbols))
    }

    fn name(&self) -> &str {
        "csv-quotes"
    }
}

/// A portfolio snapshot built from a positions CSV plus account balances.
#[derive(Debug, Clone)]
pub struct CsvPortfolioSource {
    portfolio: Portfolio,
}

impl CsvPortfolioSource {
    /// Parse positions from any reader and validate the resulting portfolio.
    pub fn from_reader<R: Read>(
        reader: R,
        account_id: impl Into<String>,
        cash_balance: Usd,
        buying_power: Usd,
    ) -> Result<Self, DataError> {
        let records: Vec<PositionRecord> = read_records(reader)?;
        let positions = records
            .into_iter()
            .map(|r| Position::new(r.symbol.to_ascii_uppercase(), r.quantity, Usd::new(r.average_cost)))
            .collect();

        let portfolio = Portfolio::new(account_id, cash_balance, buying_power, positions)?;
        debug!(
            account = %portfolio.account_id,
            positions = portfolio.position_count(),
            "Loaded portfolio from CSV"
        );
        Ok(Self { portfolio })
    }

    /// Load positions from a CSV file.
    pub fn from_path(
        path: impl AsRef<Path>,
        account_id: impl Into<String>,
        cash_balance: Usd,
        buying_power: Usd,
    ) -> Result<Self, DataError> {
        Self::from_reader(crate::open(path)?, account_id, cash_balance, buying_power)
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}

#[async_trait]
impl PortfolioSource for CsvPortfolioSource {
    async fn get_portfolio(&self, account_id: &str) -> Result<Portfolio, DataError> {
        if self.portfolio.account_id != account_id {
            return Err(DataError::NoDataAvailable(format!("account {}", account_id)));
        }
        Ok(self.portfolio.clone())
    }

    fn name(&self) -> &str {
        "csv-portfolio"
    }
}
