//! Order desk: validation plus affordability in one step.

use folio_core::error::OrderError;
use folio_core::types::{Order, OrderInput, Portfolio, Usd};
use tracing::info;

use crate::{validate_buying_power, validate_order_input, BuyingPowerCheck};

/// Turns raw order input into a pending order for a portfolio.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDesk {
    /// Skip the buying-power check for sell orders
    sells_skip_buying_power: bool,
}

impl OrderDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not require buying power for sell orders.
    pub fn with_sells_exempt(mut self) -> Self {
        self.sells_skip_buying_power = true;
        self
    }

    /// Validate `input`, check it against `portfolio` and build a pending
    /// order.
    pub fn accept(
        &self,
        input: &OrderInput,
        portfolio: &Portfolio,
        market_price: Option<Usd>,
    ) -> Result<(Order, Option<BuyingPowerCheck>), OrderError> {
        let validated = validate_order_input(input)?;

        let check = if self.sells_skip_buying_power && validated.side.is_sell() {
            None
        } else {
            Some(validate_buying_power(&validated, portfolio, market_price)?)
        };

        let order = Order::pending(validated);
        info!(
            order_id = %order.id,
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type(),
            quantity = %order.quantity,
            "Order accepted"
        );

        Ok((order, check))
    }
}
