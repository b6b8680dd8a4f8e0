//! Portfolio valuation.
//!
//! Provides position and portfolio valuation, benchmark comparison and
//! summary performance metrics. Everything here is a pure function of its
//! inputs: prices arrive in a [`PriceMap`](folio_core::PriceMap) supplied by
//! the caller.

mod benchmark;
mod performance;
mod valuation;

pub use benchmark::{
    compare_to_benchmark, default_holdings, portfolio_return, BenchmarkComparator,
    BenchmarkComparison, BenchmarkHolding, BenchmarkReport, BenchmarkValuation, Direction,
};
pub use performance::PerformanceMetrics;
pub use valuation::{
    value_portfolio, value_position, value_quoted, PortfolioValuation, PositionValuation,
    ValuationEngine,
};
