//! Logging setup and text reports.

mod logging;
mod report;

pub use logging::setup_logging;
pub use report::{benchmark_summary, order_summary, signal_summary, valuation_summary};
