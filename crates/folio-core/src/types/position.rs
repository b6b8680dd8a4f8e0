//! Position and portfolio types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Usd;
use crate::error::{ValidationError, ValuationError};

/// A holding in a single security.
///
/// Prices are supplied at valuation time; a position only carries what was
/// paid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Number of shares (fractional allowed)
    pub quantity: Decimal,
    /// Average cost per share
    pub average_cost: Usd,
}

impl Position {
    /// Create a new position.
    pub fn new(symbol: impl Into<String>, quantity: Decimal, average_cost: Usd) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            average_cost,
        }
    }

    /// Cost basis (quantity * average cost).
    pub fn cost_basis(&self) -> Result<Usd, ValuationError> {
        self.average_cost.checked_mul(self.quantity)
    }

    /// Market value at the given price.
    pub fn market_value(&self, price: Usd) -> Result<Usd, ValuationError> {
        price.checked_mul(self.quantity)
    }

    /// Check if the symbol matches, ignoring ASCII case.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }
}

/// Snapshot of an account: cash, buying power and ordered positions.
///
/// Symbols are unique within a portfolio and every quantity is positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Account identifier
    pub account_id: String,
    /// Uninvested cash
    pub cash_balance: Usd,
    /// Cash plus any margin available for new positions
    pub buying_power: Usd,
    positions: Vec<Position>,
}

impl Portfolio {
    /// Create a portfolio, rejecting duplicate symbols and empty positions.
    pub fn new(
        account_id: impl Into<String>,
        cash_balance: Usd,
        buying_power: Usd,
        positions: Vec<Position>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(positions.len());
        for position in &positions {
            if position.symbol.trim().is_empty() {
                return Err(ValidationError::EmptySymbol);
            }
            if position.quantity <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveQuantity {
                    symbol: position.symbol.clone(),
                    quantity: position.quantity,
                });
            }
            if !seen.insert(position.symbol.to_ascii_uppercase()) {
                return Err(ValidationError::DuplicatePosition(position.symbol.clone()));
            }
        }

        Ok(Self {
            account_id: account_id.into(),
            cash_balance,
            buying_power,
            positions,
        })
    }

    /// A cash-only portfolio where buying power equals cash.
    pub fn cash_only(account_id: impl Into<String>, cash: Usd) -> Self {
        Self {
            account_id: account_id.into(),
            cash_balance: cash,
            buying_power: cash,
            positions: Vec::new(),
        }
    }

    /// Positions in input order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Get a position by symbol (case-insensitive).
    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.is_symbol(symbol))
    }

    /// Check if we hold a symbol.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.get_position(symbol).is_some()
    }

    /// Get the number of positions.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Get all held symbols in order.
    pub fn symbols(&self) -> Vec<String> {
        self.positions.iter().map(|p| p.symbol.clone()).collect()
    }

    /// Total cost basis of all positions.
    pub fn total_cost(&self) -> Result<Usd, ValuationError> {
        self.positions
            .iter()
            .try_fold(Usd::ZERO, |total, p| total.checked_add(p.cost_basis()?))
    }
}
