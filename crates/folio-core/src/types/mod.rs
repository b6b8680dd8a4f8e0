//! Core data types for portfolio analysis.

mod money;
mod order;
mod position;
mod quote;
mod response;
mod signal;

pub use money::{Percent, Usd};
pub use order::{
    Order, OrderInput, OrderKind, OrderStatus, OrderType, Side, TimeInForce, ValidatedOrder,
};
pub use position::{Portfolio, Position};
pub use quote::{PriceMap, Quote};
pub use response::{ApiError, ApiResponse};
pub use signal::{
    IndicatorSignal, Recommendation, RiskLevel, SignalKind, TechnicalIndicator, TradingSignal,
};
