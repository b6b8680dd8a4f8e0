//! In-memory quote store.

use async_trait::async_trait;
use folio_core::error::DataError;
use folio_core::traits::QuoteSource;
use folio_core::types::{PriceMap, Quote};
use std::collections::HashMap;

/// Latest quotes keyed by upper-cased symbol.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: HashMap<String, Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(symbol: &str) -> String {
        symbol.trim().to_ascii_uppercase()
    }

    /// Store a quote, replacing any previous quote for the symbol.
    pub fn put(&mut self, quote: Quote) {
        self.quotes.insert(Self::key(&quote.symbol), quote);
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(&Self::key(symbol))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Clear all quotes.
    pub fn clear(&mut self) {
        self.quotes.clear();
    }

    /// Quotes for `symbols`, keyed as requested. Unknown symbols are absent.
    pub fn prices_for(&self, symbols: &[String]) -> PriceMap {
        symbols
            .iter()
            .filter_map(|s| self.get(s).map(|q| (s.clone(), q.clone())))
            .collect()
    }

    /// Every stored quote.
    pub fn to_price_map(&self) -> PriceMap {
        self.quotes.clone()
    }
}

impl Extend<Quote> for QuoteBook {
    fn extend<I: IntoIterator<Item = Quote>>(&mut self, iter: I) {
        for quote in iter {
            self.put(quote);
        }
    }
}

impl FromIterator<Quote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut book = Self::new();
        book.extend(iter);
        book
    }
}

#[async_trait]
impl QuoteSource for QuoteBook {
    async fn get_quotes(&self, symbols: &[String]) -> Result<PriceMap, DataError> {
        Ok(self.prices_for(symbols))
    }

    fn name(&self) -> &str {
        "quote-book"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Usd;
    use rust_decimal_macros::dec;

    fn book() -> QuoteBook {
        [
            Quote::new("AAPL", Usd::new(dec!(190))),
            Quote::new("msft", Usd::new(dec!(410))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let book = book();

        assert_eq!(book.len(), 2);
        assert!(book.get("aapl").is_some());
        assert!(book.get("MSFT").is_some());
        assert!(book.get("TSLA").is_none());
    }

    #[test]
    fn test_put_replaces() {
        let mut book = book();
        book.put(Quote::new("AAPL", Usd::new(dec!(195))));

        assert_eq!(book.len(), 2);
        assert_eq!(book.get("AAPL").map(|q| q.current), Some(Usd::new(dec!(195))));

        book.clear();
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_get_quotes_keys_as_requested() {
        let book = book();
        let prices = book
            .get_quotes(&["aapl".to_string(), "TSLA".to_string()])
            .await
            .unwrap();

        assert_eq!(prices.len(), 1);
        assert!(prices.contains_key("aapl"));
    }
}
