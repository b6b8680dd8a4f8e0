//! Price quotes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Percent, Usd};
use crate::error::ValuationError;

/// Symbol to latest quote.
pub type PriceMap = HashMap<String, Quote>;

/// Latest price for a symbol.
///
/// Only `current` and `previous_close` feed valuation; the rest is carried
/// for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub current: Usd,
    pub open: Usd,
    pub high: Usd,
    pub low: Usd,
    pub previous_close: Usd,
}

impl Quote {
    /// A flat quote where every field equals `current`.
    pub fn new(symbol: impl Into<String>, current: Usd) -> Self {
        Self {
            symbol: symbol.into(),
            current,
            open: current,
            high: current,
            low: current,
            previous_close: current,
        }
    }

    /// Set the previous close.
    pub fn with_previous_close(mut self, previous_close: Usd) -> Self {
        self.previous_close = previous_close;
        self
    }

    /// Change since the previous close.
    pub fn change(&self) -> Result<Usd, ValuationError> {
        self.current.checked_sub(self.previous_close)
    }

    /// Change since the previous close as a percentage.
    pub fn change_percent(&self) -> Option<Percent> {
        Percent::of(self.change().ok()?, self.previous_close).ok()
    }
}
