//! Supplier traits.
//!
//! Prices, signals and portfolio snapshots always arrive through these
//! traits; the valuation and analysis crates never source their own data.

mod data_source;

pub use data_source::{PortfolioSource, QuoteSource, SignalSource};
