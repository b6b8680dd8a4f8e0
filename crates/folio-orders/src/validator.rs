//! Order input validation.

use folio_core::error::{OrderError, ValidationError};
use folio_core::types::{OrderInput, OrderKind, OrderType, Usd, ValidatedOrder};
use rust_decimal::Decimal;
use tracing::debug;

/// Normalize a ticker symbol: trimmed, upper-cased, 1-5 ASCII letters.
pub fn normalize_symbol(symbol: &str) -> Result<String, ValidationError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let upper = trimmed.to_ascii_uppercase();
    if upper.len() > 5 || !upper.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidSymbol(trimmed.to_string()));
    }

    Ok(upper)
}

fn positive(value: Option<Decimal>) -> Option<Usd> {
    value.filter(|v| *v > Decimal::ZERO).map(Usd::new)
}

/// Validate raw order input.
///
/// Checks run in a fixed order and stop at the first failure: symbol,
/// quantity, order type, then the prices that type requires (stop before
/// limit for stop-limit orders).
pub fn validate_order_input(input: &OrderInput) -> Result<ValidatedOrder, OrderError> {
    let symbol = input.symbol.trim();
    if symbol.is_empty() {
        return Err(OrderError::EmptySymbol);
    }

    let quantity = input
        .quantity
        .filter(|q| *q > Decimal::ZERO)
        .ok_or(OrderError::InvalidQuantity)?;

    let order_type: OrderType = input.order_type.trim().parse()?;

    let limit = || {
        positive(input.limit_price).ok_or(OrderError::InvalidLimitPrice { order_type })
    };
    let stop = || positive(input.stop_price).ok_or(OrderError::InvalidStopPrice { order_type });

    let kind = match order_type {
        OrderType::Market => OrderKind::Market,
        OrderType::Limit => OrderKind::Limit {
            limit_price: limit()?,
        },
        OrderType::Stop => OrderKind::Stop {
            stop_price: stop()?,
        },
        OrderType::StopLimit => {
            let stop_price = stop()?;
            OrderKind::StopLimit {
                stop_price,
                limit_price: limit()?,
            }
        }
    };

    let order = ValidatedOrder {
        symbol: symbol.to_ascii_uppercase(),
        side: input.side,
        quantity,
        kind,
        time_in_force: input.time_in_force.unwrap_or_default(),
    };

    debug!(
        symbol = %order.symbol,
        side = %order.side,
        order_type = %order.order_type(),
        quantity = %order.quantity,
        "Order input validated"
    );

    Ok(order)
}
