//! Summary performance metrics.

use folio_core::types::{Percent, Usd};
use serde::Serialize;

use crate::PortfolioValuation;

/// Headline return figures for a valued portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Total unrealized P&L
    pub total_return: Usd,
    /// Total P&L relative to total cost
    pub total_return_percent: Option<Percent>,
    /// Day change
    pub day_return: Usd,
    /// Day change relative to total value (cash included)
    pub day_return_percent: Option<Percent>,
    /// Always zero: realized gains need transaction history
    pub realized_gains: Usd,
    /// Sum of per-position unrealized P&L
    pub unrealized_gains: Usd,
}

impl PerformanceMetrics {
    /// Derive metrics from a portfolio valuation.
    pub fn from_valuation(valuation: &PortfolioValuation) -> Self {
        Self {
            total_return: valuation.total_pnl,
            total_return_percent: Percent::of(valuation.total_pnl, valuation.total_cost).ok(),
            day_return: valuation.day_change,
            day_return_percent: Percent::of(valuation.day_change, valuation.total_value).ok(),
            realized_gains: Usd::ZERO,
            // Same sum as total P&L, already range-checked by valuation
            unrealized_gains: valuation.total_pnl,
        }
    }
}
