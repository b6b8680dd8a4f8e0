//! Portfolio valuation command.

use anyhow::Result;
use folio_config::AppConfig;
use folio_monitor::valuation_summary;
use folio_valuation::{PerformanceMetrics, PortfolioValuation};
use serde::Serialize;
use tracing::info;

use super::{emit, load_portfolio, value_loaded};
use crate::cli::{OutputFormat, ValueArgs};

#[derive(Serialize)]
struct ValueOutput {
    valuation: PortfolioValuation,
    performance: PerformanceMetrics,
}

pub async fn run(args: ValueArgs, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let loaded = load_portfolio(&args.portfolio, config).await?;

    let valuation = value_loaded(&loaded, output)?;
    let performance = PerformanceMetrics::from_valuation(&valuation);
    info!(
        total_value = %valuation.total_value,
        skipped = valuation.skipped.len(),
        "Valuation complete"
    );

    emit(
        output,
        ValueOutput {
            valuation,
            performance,
        },
        |out| valuation_summary(&out.valuation, &out.performance),
    )
}
