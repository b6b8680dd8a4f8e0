//! Position and portfolio valuation.

use folio_core::error::ValuationError;
use folio_core::types::{Percent, Portfolio, Position, PriceMap, Quote, Usd};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Valuation of one position against a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    /// Symbol
    pub symbol: String,
    /// Number of shares
    pub quantity: Decimal,
    /// Price used for the valuation
    pub current_price: Usd,
    /// Market value (quantity * current price)
    pub market_value: Usd,
    /// Cost basis (quantity * average cost)
    pub cost_basis: Usd,
    /// Unrealized profit/loss
    pub pnl: Usd,
    /// Unrealized P&L as a percentage of cost basis; `None` when the cost
    /// basis is zero or the ratio is out of range
    pub pnl_percent: Option<Percent>,
    /// Change in market value since the previous close
    pub day_change: Usd,
    /// Day change as a percentage of the previous-close value
    pub day_change_percent: Option<Percent>,
}

/// Value a position at a price, with no day-change information.
pub fn value_position(
    position: &Position,
    current_price: Usd,
) -> Result<PositionValuation, ValuationError> {
    value_quoted(position, &Quote::new(position.symbol.clone(), current_price))
}

/// Value a position against a full quote.
///
/// Fails with [`ValuationError::Overflow`] when a value or change leaves the
/// `Decimal` range. A P&L percentage that cannot be computed is `None`.
pub fn value_quoted(position: &Position, quote: &Quote) -> Result<PositionValuation, ValuationError> {
    let market_value = position.market_value(quote.current)?;
    let cost_basis = position.cost_basis()?;
    let pnl = market_value.checked_sub(cost_basis)?;

    let pnl_percent = match Percent::of(pnl, cost_basis) {
        Ok(pct) => Some(pct),
        Err(e) => {
            debug!(symbol = %position.symbol, error = %e, "P&L percent undefined");
            None
        }
    };

    let day_change = quote.change()?.checked_mul(position.quantity)?;
    let previous_value = market_value.checked_sub(day_change)?;
    let day_change_percent = Percent::of(day_change, previous_value).ok();

    Ok(PositionValuation {
        symbol: position.symbol.clone(),
        quantity: position.quantity,
        current_price: quote.current,
        market_value,
        cost_basis,
        pnl,
        pnl_percent,
        day_change,
        day_change_percent,
    })
}

/// Aggregate valuation of a set of positions plus cash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    /// Uninvested cash
    pub cash_balance: Usd,
    /// Valuations of the positions that had a price, in input order
    pub positions: Vec<PositionValuation>,
    /// Symbols left out of every total because no price was available
    pub skipped: Vec<String>,
    /// Sum of included market values
    pub market_value: Usd,
    /// Cash plus included market value
    pub total_value: Usd,
    /// Sum of included cost bases
    pub total_cost: Usd,
    /// Sum of included unrealized P&L
    pub total_pnl: Usd,
    /// `total_pnl / total_cost * 100`; `None` when nothing was invested
    pub total_pnl_percent: Option<Percent>,
    /// Sum of included day changes
    pub day_change: Usd,
    /// Day change relative to the previous-close value of included positions
    pub day_change_percent: Option<Percent>,
}

impl PortfolioValuation {
    /// Number of positions that were priced.
    pub fn included_count(&self) -> usize {
        self.positions.len()
    }

    /// Get a position valuation by symbol.
    pub fn get(&self, symbol: &str) -> Option<&PositionValuation> {
        self.positions
            .iter()
            .find(|p| p.symbol.eq_ignore_ascii_case(symbol))
    }
}

fn find_quote<'a>(prices: &'a PriceMap, symbol: &str) -> Option<&'a Quote> {
    prices
        .get(symbol)
        .or_else(|| prices.get(&symbol.to_ascii_uppercase()))
}

/// Value positions against a price map.
///
/// A position whose symbol has no quote is skipped: it contributes to none
/// of the totals and its symbol is recorded in
/// [`PortfolioValuation::skipped`]. Missing prices are never an error; a
/// total outside the `Decimal` range is.
pub fn value_portfolio(
    positions: &[Position],
    prices: &PriceMap,
    cash_balance: Usd,
) -> Result<PortfolioValuation, ValuationError> {
    let mut valued = Vec::with_capacity(positions.len());
    let mut skipped = Vec::new();

    for position in positions {
        match find_quote(prices, &position.symbol) {
            Some(quote) => valued.push(value_quoted(position, quote)?),
            None => {
                debug!(symbol = %position.symbol, "No price available, excluding from totals");
                skipped.push(position.symbol.clone());
            }
        }
    }

    let market_value = Usd::checked_sum(valued.iter().map(|p| p.market_value))?;
    let total_cost = Usd::checked_sum(valued.iter().map(|p| p.cost_basis))?;
    let total_pnl = Usd::checked_sum(valued.iter().map(|p| p.pnl))?;
    let day_change = Usd::checked_sum(valued.iter().map(|p| p.day_change))?;
    let total_value = cash_balance.checked_add(market_value)?;

    let total_pnl_percent = match Percent::of(total_pnl, total_cost) {
        Ok(pct) => Some(pct),
        Err(e) => {
            debug!(error = %e, "Total P&L percent undefined");
            None
        }
    };
    let day_change_percent = market_value
        .checked_sub(day_change)
        .and_then(|previous_value| Percent::of(day_change, previous_value))
        .ok();

    Ok(PortfolioValuation {
        cash_balance,
        positions: valued,
        skipped,
        market_value,
        total_value,
        total_cost,
        total_pnl,
        total_pnl_percent,
        day_change,
        day_change_percent,
    })
}

/// Values whole portfolio snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    /// Create a new valuation engine.
    pub fn new() -> Self {
        Self
    }

    /// Value a portfolio snapshot against the given prices.
    pub fn value(
        &self,
        portfolio: &Portfolio,
        prices: &PriceMap,
    ) -> Result<PortfolioValuation, ValuationError> {
        let valuation = value_portfolio(portfolio.positions(), prices, portfolio.cash_balance)?;
        debug!(
            account = %portfolio.account_id,
            included = valuation.included_count(),
            skipped = valuation.skipped.len(),
            total_value = %valuation.total_value,
            "Portfolio valued"
        );
        Ok(valuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Usd {
        Usd::new(amount)
    }

    fn quote(symbol: &str, current: Decimal, previous_close: Decimal) -> (String, Quote) {
        (
            symbol.to_string(),
            Quote::new(symbol, usd(current)).with_previous_close(usd(previous_close)),
        )
    }

    fn sample_positions() -> Vec<Position> {
        vec![
            Position::new("AAPL", dec!(10), usd(dec!(150))),
            Position::new("MSFT", dec!(5), usd(dec!(300))),
            Position::new("TSLA", dec!(2), usd(dec!(250))),
        ]
    }

    fn sample_prices() -> PriceMap {
        [
            quote("AAPL", dec!(175), dec!(170)),
            quote("MSFT", dec!(290), dec!(295)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_value_position() {
        let position = Position::new("AAPL", dec!(10), usd(dec!(150)));
        let valuation = value_position(&position, usd(dec!(175))).unwrap();

        assert_eq!(valuation.market_value, usd(dec!(1750)));
        assert_eq!(valuation.cost_basis, usd(dec!(1500)));
        assert_eq!(valuation.pnl, usd(dec!(250)));
        assert_eq!(
            valuation.pnl_percent,
            Some(Percent::of(usd(dec!(250)), usd(dec!(1500))).unwrap())
        );
        assert_eq!(valuation.day_change, Usd::ZERO);
    }

    #[test]
    fn test_value_position_loss() {
        let position = Position::new("MSFT", dec!(4), usd(dec!(300)));
        let valuation = value_position(&position, usd(dec!(270))).unwrap();

        assert_eq!(valuation.pnl, usd(dec!(-120)));
        assert_eq!(valuation.pnl_percent, Some(Percent::new(dec!(-10))));
    }

    #[test]
    fn test_value_position_zero_cost_basis() {
        let position = Position::new("GIFT", dec!(3), Usd::ZERO);
        let valuation = value_position(&position, usd(dec!(20))).unwrap();

        assert_eq!(valuation.market_value, usd(dec!(60)));
        assert_eq!(valuation.pnl, usd(dec!(60)));
        assert_eq!(valuation.pnl_percent, None);
    }

    #[test]
    fn test_value_quoted_day_change() {
        let position = Position::new("AAPL", dec!(10), usd(dec!(150)));
        let (_, q) = quote("AAPL", dec!(175), dec!(170));
        let valuation = value_quoted(&position, &q).unwrap();

        assert_eq!(valuation.day_change, usd(dec!(50)));
        assert_eq!(
            valuation.day_change_percent,
            Some(Percent::of(usd(dec!(50)), usd(dec!(1700))).unwrap())
        );
    }

    #[test]
    fn test_value_portfolio_totals() {
        let valuation = value_portfolio(&sample_positions(), &sample_prices(), usd(dec!(1000))).unwrap();

        assert_eq!(valuation.included_count(), 2);
        assert_eq!(valuation.market_value, usd(dec!(3200)));
        assert_eq!(valuation.total_value, usd(dec!(4200)));
        assert_eq!(valuation.total_cost, usd(dec!(3000)));
        assert_eq!(valuation.total_pnl, usd(dec!(200)));
        assert_eq!(
            valuation.total_pnl_percent,
            Some(Percent::of(usd(dec!(200)), usd(dec!(3000))).unwrap())
        );
        assert_eq!(valuation.day_change, usd(dec!(25)));
        assert_eq!(
            valuation.day_change_percent,
            Some(Percent::of(usd(dec!(25)), usd(dec!(3175))).unwrap())
        );
    }

    #[test]
    fn test_value_portfolio_skips_missing_prices() {
        let valuation = value_portfolio(&sample_positions(), &sample_prices(), usd(dec!(1000))).unwrap();

        assert_eq!(valuation.skipped, vec!["TSLA".to_string()]);
        assert!(valuation.get("TSLA").is_none());
        assert!(valuation.get("aapl").is_some());
    }

    #[test]
    fn test_value_portfolio_without_positions() {
        let valuation = value_portfolio(&[], &PriceMap::new(), usd(dec!(500))).unwrap();

        assert_eq!(valuation.total_value, usd(dec!(500)));
        assert_eq!(valuation.total_cost, Usd::ZERO);
        assert_eq!(valuation.total_pnl_percent, None);
        assert_eq!(valuation.day_change_percent, None);
    }

    #[test]
    fn test_value_portfolio_uppercase_fallback() {
        let positions = vec![Position::new("aapl", dec!(1), usd(dec!(100)))];
        let valuation = value_portfolio(&positions, &sample_prices(), Usd::ZERO).unwrap();

        assert!(valuation.skipped.is_empty());
        assert_eq!(valuation.market_value, usd(dec!(175)));
    }

    #[test]
    fn test_engine_is_deterministic() {
        let portfolio = Portfolio::new(
            "default",
            usd(dec!(1000)),
            usd(dec!(1000)),
            sample_positions(),
        )
        .unwrap();
        let prices = sample_prices();
        let engine = ValuationEngine::new();

        assert_eq!(engine.value(&portfolio, &prices), engine.value(&portfolio, &prices));
        assert!(engine.value(&portfolio, &prices).is_ok());
    }

    #[test]
    fn test_value_position_tiny_cost_basis() {
        let position = Position::new("PENNY", dec!(1), usd(dec!(0.0000000000000000001)));
        let valuation = value_position(&position, usd(dec!(1000000000000))).unwrap();

        assert_eq!(valuation.market_value, usd(dec!(1000000000000)));
        assert_eq!(valuation.pnl_percent, None);
    }

    #[test]
    fn test_value_position_overflow() {
        let position = Position::new("BIG", dec!(100000000000000000), usd(dec!(1)));
        assert_eq!(
            value_position(&position, usd(dec!(1000000000000))),
            Err(ValuationError::Overflow)
        );
    }

    #[test]
    fn test_value_portfolio_overflow() {
        let positions = vec![
            Position::new("AAPL", dec!(10), usd(dec!(150))),
            Position::new("BIG", dec!(100000000000000000), usd(dec!(1))),
        ];
        let prices: PriceMap = [
            quote("AAPL", dec!(175), dec!(170)),
            quote("BIG", dec!(1000000000000), dec!(1000000000000)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            value_portfolio(&positions, &prices, usd(dec!(1000))),
            Err(ValuationError::Overflow)
        );
    }

    #[test]
    fn test_value_portfolio_total_overflow() {
        // Each position fits on its own; their sum does not
        let half = Decimal::MAX / dec!(2) + dec!(1);
        let positions = vec![
            Position::new("AAA", dec!(1), usd(dec!(1))),
            Position::new("BBB", dec!(1), usd(dec!(1))),
        ];
        let prices: PriceMap = [quote("AAA", half, half), quote("BBB", half, half)]
            .into_iter()
            .collect();

        assert_eq!(
            value_portfolio(&positions, &prices, Usd::ZERO),
            Err(ValuationError::Overflow)
        );
    }
}
