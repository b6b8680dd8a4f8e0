//! Error types for portfolio analysis.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{OrderType, Usd};

/// Top-level error.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Malformed or missing input fields outside of order entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Symbol must be a non-empty string")]
    EmptySymbol,

    #[error("Symbol must contain 1-5 alphabetic characters only: {0}")]
    InvalidSymbol(String),

    #[error("Duplicate position for symbol {0}")]
    DuplicatePosition(String),

    #[error("Position {symbol} has non-positive quantity {quantity}")]
    NonPositiveQuantity { symbol: String, quantity: Decimal },

    #[error("Signal for {symbol} has confidence {confidence} outside 0..=100")]
    ConfidenceOutOfRange { symbol: String, confidence: Decimal },
}

/// Ratios that cannot be computed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Division by zero: ratio is undefined")]
    DivisionByZero,

    #[error("Arithmetic overflow: result is outside the decimal range")]
    Overflow,
}

impl ValuationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValuationError::DivisionByZero => "DIVISION_BY_ZERO",
            ValuationError::Overflow => "VALUATION_OVERFLOW",
        }
    }
}

/// Broad category of an [`OrderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderErrorKind {
    Validation,
    UnsupportedOrderType,
    InsufficientFunds,
}

/// Order entry and affordability errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Symbol is required and must be a non-empty string")]
    EmptySymbol,

    #[error("Quantity must be a positive number")]
    InvalidQuantity,

    #[error("Limit price must be a positive number for {} orders", .order_type.label())]
    InvalidLimitPrice { order_type: OrderType },

    #[error("Stop price must be a positive number for {} orders", .order_type.label())]
    InvalidStopPrice { order_type: OrderType },

    #[error("Unsupported order type: {0}")]
    UnsupportedOrderType(String),

    #[error("A current market price is required to estimate {} orders", .order_type.label())]
    MissingReferencePrice { order_type: OrderType },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Usd, available: Usd },

    #[error("Estimated order cost is too large to compute")]
    CostOverflow,
}

impl OrderError {
    /// Stable machine-readable code for rendering.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::EmptySymbol => "EMPTY_SYMBOL",
            OrderError::InvalidQuantity => "INVALID_QUANTITY",
            OrderError::InvalidLimitPrice { .. } => "INVALID_LIMIT_PRICE",
            OrderError::InvalidStopPrice { .. } => "INVALID_STOP_PRICE",
            OrderError::UnsupportedOrderType(_) => "UNSUPPORTED_ORDER_TYPE",
            OrderError::MissingReferencePrice { .. } => "MISSING_REFERENCE_PRICE",
            OrderError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            OrderError::CostOverflow => "COST_OVERFLOW",
        }
    }

    pub fn kind(&self) -> OrderErrorKind {
        match self {
            OrderError::UnsupportedOrderType(_) => OrderErrorKind::UnsupportedOrderType,
            OrderError::InsufficientFunds { .. } => OrderErrorKind::InsufficientFunds,
            OrderError::EmptySymbol
            | OrderError::InvalidQuantity
            | OrderError::InvalidLimitPrice { .. }
            | OrderError::InvalidStopPrice { .. }
            | OrderError::MissingReferencePrice { .. }
            | OrderError::CostOverflow => OrderErrorKind::Validation,
        }
    }
}

/// Supplier errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available: {0}")]
    NoDataAvailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Result type alias for portfolio operations.
pub type FolioResult<T> = Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_error_messages() {
        let err = OrderError::InvalidLimitPrice {
            order_type: OrderType::StopLimit,
        };
        assert_eq!(
            err.to_string(),
            "Limit price must be a positive number for stop-limit orders"
        );
        assert_eq!(err.code(), "INVALID_LIMIT_PRICE");
        assert_eq!(err.kind(), OrderErrorKind::Validation);
    }

    #[test]
    fn test_folio_error_conversions() {
        let err: FolioError = OrderError::InvalidQuantity.into();
        assert_eq!(err.to_string(), "Order error: Quantity must be a positive number");

        let err: FolioError = ValuationError::DivisionByZero.into();
        assert!(matches!(err, FolioError::Valuation(_)));

        let err: FolioError = ValuationError::Overflow.into();
        assert_eq!(
            err.to_string(),
            "Valuation error: Arithmetic overflow: result is outside the decimal range"
        );

        let err: FolioError = DataError::Invalid(ValidationError::EmptySymbol).into();
        assert_eq!(
            err.to_string(),
            "Data error: Invalid record: Symbol must be a non-empty string"
        );
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = OrderError::InsufficientFunds {
            required: Usd::new(dec!(1500)),
            available: Usd::new(dec!(999.5)),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required $1500.00, available $999.50"
        );
        assert_eq!(err.kind(), OrderErrorKind::InsufficientFunds);
    }
}
