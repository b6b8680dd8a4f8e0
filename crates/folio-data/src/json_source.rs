//! JSON-backed signal supplier and order input reader.

use async_trait::async_trait;
use folio_core::error::DataError;
use folio_core::traits::SignalSource;
use folio_core::types::{OrderInput, TradingSignal};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Signals loaded from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonSignalSource {
    signals: Vec<TradingSignal>,
}

impl JsonSignalSource {
    /// Parse a JSON array of signals, rejecting out-of-range confidences.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let signals: Vec<TradingSignal> =
            serde_json::from_reader(reader).map_err(|e| DataError::ParseError(e.to_string()))?;

        for signal in &signals {
            signal.validate()?;
        }

        debug!(signals = signals.len(), "Loaded signals from JSON");
        Ok(Self { signals })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_reader(crate::open(path)?)
    }

    /// All loaded signals in file order.
    pub fn all(&self) -> &[TradingSignal] {
        &self.signals
    }

    /// Signals for one symbol, in file order.
    pub fn for_symbol(&self, symbol: &str) -> Vec<TradingSignal> {
        let symbol = symbol.trim();
        self.signals
            .iter()
            .filter(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SignalSource for JsonSignalSource {
    async fn get_signals(&self, symbol: &str) -> Result<Vec<TradingSignal>, DataError> {
        Ok(self.for_symbol(symbol))
    }

    fn name(&self) -> &str {
        "json-signals"
    }
}

/// Read one order input object.
pub fn read_order_input<R: Read>(reader: R) -> Result<OrderInput, DataError> {
    serde_json::from_reader(reader).map_err(|e| DataError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::error::ValidationError;
    use folio_core::types::{Percent, Side, SignalKind};
    use rust_decimal_macros::dec;

    const SIGNALS: &str = r#"[
        {"symbol": "AAPL", "signal": "STRONG_BUY", "confidence": 90,
         "indicators": [{"name": "RSI", "value": 28.5, "signal": "BUY"}],
         "reasoning": "Oversold"},
        {"symbol": "AAPL", "signal": "BUY", "confidence": 70},
        {"symbol": "MSFT", "signal": "SELL", "confidence": 65}
    ]"#;

    #[test]
    fn test_parse_signals() {
        let source = JsonSignalSource::from_reader(SIGNALS.as_bytes()).unwrap();

        assert_eq!(source.all().len(), 3);
        let aapl = source.for_symbol("aapl");
        assert_eq!(aapl.len(), 2);
        assert_eq!(aapl[0].signal, SignalKind::StrongBuy);
        assert_eq!(aapl[0].confidence, Percent::new(dec!(90)));
        assert_eq!(aapl[0].indicators.len(), 1);
        assert_eq!(aapl[1].reasoning, "");
    }

    #[test]
    fn test_confidence_out_of_range() {
        let json = r#"[{"symbol": "AAPL", "signal": "BUY", "confidence": 120}]"#;
        let err = JsonSignalSource::from_reader(json.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::Invalid(ValidationError::ConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_signal_kind() {
        let json = r#"[{"symbol": "AAPL", "signal": "MAYBE", "confidence": 50}]"#;
        assert!(matches!(
            JsonSignalSource::from_reader(json.as_bytes()),
            Err(DataError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_signal_source_trait() {
        let source = JsonSignalSource::from_reader(SIGNALS.as_bytes()).unwrap();

        assert_eq!(source.get_signals("MSFT").await.unwrap().len(), 1);
        assert!(source.get_signals("TSLA").await.unwrap().is_empty());
    }

    #[test]
    fn test_read_order_input() {
        let json = r#"{"symbol": "AAPL", "side": "SELL", "type": "STOP", "quantity": 3, "stopPrice": 160}"#;
        let input = read_order_input(json.as_bytes()).unwrap();

        assert_eq!(input.side, Side::Sell);
        assert_eq!(input.order_type, "STOP");
        assert_eq!(input.stop_price, Some(dec!(160)));
    }
}
