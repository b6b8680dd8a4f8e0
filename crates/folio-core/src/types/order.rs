//! Order types and structures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Usd;
use crate::error::OrderError;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Side::Sell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order - execute immediately at best available price
    Market,
    /// Limit order - execute at specified price or better
    Limit,
    /// Stop order - becomes market order when stop price is reached
    Stop,
    /// Stop-limit order - becomes limit order when stop price is reached
    StopLimit,
}

impl OrderType {
    /// Lower-case label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop-limit",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Stop => write!(f, "STOP"),
            OrderType::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP" => Ok(OrderType::Stop),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            other => Err(OrderError::UnsupportedOrderType(other.to_string())),
        }
    }
}

/// Time in force for limit-style orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Valid for the trading day only
    #[default]
    Day,
    /// Good til canceled
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Check if the order is active (can still be filled).
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::PartiallyFilled)
    }
}

/// Order entry as received from a client, before validation.
///
/// Every field a client may omit or get wrong is optional or untyped here;
/// [`ValidatedOrder`] is the checked form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    /// Symbol to trade
    #[serde(default)]
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Order type discriminant, e.g. `LIMIT`
    #[serde(rename = "type")]
    pub order_type: String,
    /// Quantity to trade
    #[serde(
        default,
        deserialize_with = "number_or_absent",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub quantity: Option<Decimal>,
    /// Limit price (limit and stop-limit orders)
    #[serde(
        default,
        deserialize_with = "number_or_absent",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub limit_price: Option<Decimal>,
    /// Stop price (stop and stop-limit orders)
    #[serde(
        default,
        deserialize_with = "number_or_absent",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub stop_price: Option<Decimal>,
    /// Time in force
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
}

/// Read a numeric field, treating any non-number (a string, `null`, an
/// object) as absent so validation reports the field itself.
fn number_or_absent<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    })
}

impl OrderInput {
    fn base(symbol: impl Into<String>, side: Side, order_type: OrderType, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: order_type.to_string(),
            quantity: Some(quantity),
            limit_price: None,
            stop_price: None,
            time_in_force: None,
        }
    }

    /// Create a market order input.
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self::base(symbol, side, OrderType::Market, quantity)
    }

    /// Create a limit order input.
    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            limit_price: Some(limit_price),
            ..Self::base(symbol, side, OrderType::Limit, quantity)
        }
    }

    /// Create a stop order input.
    pub fn stop(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            stop_price: Some(stop_price),
            ..Self::base(symbol, side, OrderType::Stop, quantity)
        }
    }

    /// Create a stop-limit order input.
    pub fn stop_limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            stop_price: Some(stop_price),
            limit_price: Some(limit_price),
            ..Self::base(symbol, side, OrderType::StopLimit, quantity)
        }
    }

    /// Set the time in force.
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }
}

/// Type-specific prices of a validated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    #[serde(rename_all = "camelCase")]
    Limit { limit_price: Usd },
    #[serde(rename_all = "camelCase")]
    Stop { stop_price: Usd },
    #[serde(rename_all = "camelCase")]
    StopLimit { stop_price: Usd, limit_price: Usd },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::Stop { .. } => OrderType::Stop,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }

    pub fn limit_price(&self) -> Option<Usd> {
        match self {
            OrderKind::Limit { limit_price } | OrderKind::StopLimit { limit_price, .. } => {
                Some(*limit_price)
            }
            OrderKind::Market | OrderKind::Stop { .. } => None,
        }
    }

    pub fn stop_price(&self) -> Option<Usd> {
        match self {
            OrderKind::Stop { stop_price } | OrderKind::StopLimit { stop_price, .. } => {
                Some(*stop_price)
            }
            OrderKind::Market | OrderKind::Limit { .. } => None,
        }
    }
}

/// Order input that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedOrder {
    pub symbol: String,
    pub side: Side,
    pub quantity: Decimal,
    #[serde(flatten)]
    pub kind: OrderKind,
    pub time_in_force: TimeInForce,
}

impl ValidatedOrder {
    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }
}

/// An order accepted for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,
    pub symbol: String,
    pub side: Side,
    pub quantity: Decimal,
    #[serde(flatten)]
    pub kind: OrderKind,
    pub time_in_force: TimeInForce,
    /// Current status
    pub status: OrderStatus,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// When the order was last updated
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order from validated input.
    pub fn pending(order: ValidatedOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            symbol: order.symbol,
            side: order.side,
            quantity: order.quantity,
            kind: order.kind,
            time_in_force: order.time_in_force,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    /// Check if the order can be cancelled.
    pub fn is_cancelable(&self) -> bool {
        self.status.is_active()
    }
}
