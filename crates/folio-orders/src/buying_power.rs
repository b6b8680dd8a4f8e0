//! Buying-power and holdings checks.

use folio_core::error::OrderError;
use folio_core::types::{OrderKind, Portfolio, Usd, ValidatedOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Outcome of a buying-power check.
///
/// [`check_buying_power`] reports both outcomes. [`validate_buying_power`]
/// turns an insufficient check into `InsufficientFunds`, so a check it
/// returns is always sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyingPowerCheck {
    /// Quantity times the reference price
    pub estimated_cost: Usd,
    /// Buying power the cost was checked against
    pub available: Usd,
    /// Cost does not exceed buying power
    pub sufficient: bool,
}

/// Estimate the cost of an order.
///
/// Limit and stop-limit orders are priced at their limit. Market and stop
/// orders need the current market price supplied by the caller.
pub fn estimate_cost(order: &ValidatedOrder, market_price: Option<Usd>) -> Result<Usd, OrderError> {
    let reference = match order.kind {
        OrderKind::Limit { limit_price } | OrderKind::StopLimit { limit_price, .. } => limit_price,
        OrderKind::Market | OrderKind::Stop { .. } => {
            market_price.ok_or(OrderError::MissingReferencePrice {
                order_type: order.order_type(),
            })?
        }
    };

    reference
        .checked_mul(order.quantity)
        .map_err(|_| OrderError::CostOverflow)
}

/// Compare an order's estimated cost with the portfolio's buying power.
///
/// A cost equal to the buying power is sufficient. The side of the order is
/// not considered, so sells are checked the same way as buys.
pub fn check_buying_power(
    order: &ValidatedOrder,
    portfolio: &Portfolio,
    market_price: Option<Usd>,
) -> Result<BuyingPowerCheck, OrderError> {
    let estimated_cost = estimate_cost(order, market_price)?;
    let available = portfolio.buying_power;

    Ok(BuyingPowerCheck {
        estimated_cost,
        available,
        sufficient: estimated_cost <= available,
    })
}

/// Check that the portfolio can pay for an order, failing with
/// `InsufficientFunds` when it cannot.
pub fn validate_buying_power(
    order: &ValidatedOrder,
    portfolio: &Portfolio,
    market_price: Option<Usd>,
) -> Result<BuyingPowerCheck, OrderError> {
    let check = check_buying_power(order, portfolio, market_price)?;

    if !check.sufficient {
        debug!(
            symbol = %order.symbol,
            required = %check.estimated_cost,
            available = %check.available,
            "Order exceeds buying power"
        );
        return Err(OrderError::InsufficientFunds {
            required: check.estimated_cost,
            available: check.available,
        });
    }

    Ok(check)
}

/// Whether `quantity` shares at `price` fit in the portfolio's buying power.
///
/// A cost too large to compute never fits.
pub fn can_afford_position(portfolio: &Portfolio, quantity: Decimal, price: Usd) -> bool {
    price
        .checked_mul(quantity)
        .is_ok_and(|cost| cost <= portfolio.buying_power)
}

/// Whether the portfolio holds at least `quantity` shares of `symbol`.
pub fn has_enough_shares(portfolio: &Portfolio, symbol: &str, quantity: Decimal) -> bool {
    portfolio
        .get_position(symbol)
        .is_some_and(|p| p.quantity >= quantity)
}
