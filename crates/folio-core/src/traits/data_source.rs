//! Data supplier trait definitions.

use crate::error::DataError;
use crate::types::{Portfolio, PriceMap, Quote, TradingSignal};
use async_trait::async_trait;

/// Trait for latest-price suppliers.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quotes.
    ///
    /// # Arguments
    /// * `symbols` - The symbols to quote
    ///
    /// # Returns
    /// A map keyed by symbol. Symbols the source cannot price are absent
    /// from the map rather than reported as errors.
    async fn get_quotes(&self, symbols: &[String]) -> Result<PriceMap, DataError>;

    /// Fetch the latest quote for a single symbol.
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
        let mut quotes = self.get_quotes(&[symbol.to_string()]).await?;
        Ok(quotes.remove(symbol))
    }

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Trait for trading signal suppliers.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Fetch the signals currently published for a symbol, in source order.
    async fn get_signals(&self, symbol: &str) -> Result<Vec<TradingSignal>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Trait for portfolio snapshot suppliers.
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    /// Fetch the current snapshot for an account.
    async fn get_portfolio(&self, account_id: &str) -> Result<Portfolio, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Usd;
    use rust_decimal_macros::dec;

    struct FixedQuotes;

    #[async_trait]
    impl QuoteSource for FixedQuotes {
        async fn get_quotes(&self, symbols: &[String]) -> Result<PriceMap, DataError> {
            Ok(symbols
                .iter()
                .filter(|s| s.as_str() == "AAPL")
                .map(|s| (s.clone(), Quote::new(s.clone(), Usd::new(dec!(190)))))
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_get_quote_default() {
        let source = FixedQuotes;

        let quote = source.get_quote("AAPL").await.unwrap();
        assert_eq!(quote.map(|q| q.current), Some(Usd::new(dec!(190))));

        let missing = source.get_quote("ZZZZ").await.unwrap();
        assert!(missing.is_none());
    }
}
