//! Order validation command.

use anyhow::{Context, Result};
use folio_config::AppConfig;
use folio_core::types::{ApiError, Order, Usd};
use folio_data::read_order_input;
use folio_monitor::order_summary;
use folio_orders::{BuyingPowerCheck, OrderDesk};
use serde::Serialize;
use std::fs::File;
use tracing::{info, warn};

use super::{emit, emit_error, load_portfolio};
use crate::cli::{OrderArgs, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderOutput {
    order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    buying_power: Option<BuyingPowerCheck>,
}

pub async fn run(args: OrderArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let file = File::open(&args.order)
        .with_context(|| format!("Failed to open order file {}", args.order.display()))?;
    let input = read_order_input(file)?;
    let loaded = load_portfolio(&args.portfolio, config).await?;

    // Explicit price first, then the quote for the order's symbol
    let market_price = args.market_price.map(Usd::new).or_else(|| {
        loaded
            .quotes
            .book()
            .get(&input.symbol)
            .map(|q| q.current)
    });

    let desk = if args.sells_exempt {
        OrderDesk::new().with_sells_exempt()
    } else {
        OrderDesk::new()
    };

    match desk.accept(&input, &loaded.portfolio, market_price) {
        Ok((order, buying_power)) => {
            info!(order_id = %order.id, "Order validated");
            emit(output, OrderOutput { order, buying_power }, |out| {
                order_summary(&out.order, out.buying_power.as_ref())
            })
        }
        Err(e) => {
            warn!(code = e.code(), error = %e, "Order rejected");
            emit_error(output, ApiError::from(&e))?;
            Err(e).context("Order rejected")
        }
    }
}
