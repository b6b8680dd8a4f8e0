//! Signal analysis command.

use anyhow::{Context, Result};
use folio_core::traits::SignalSource;
use folio_data::JsonSignalSource;
use folio_monitor::signal_summary;
use folio_signals::{aggregate_signals, assess_sentiment, default_factors, SentimentSummary, SignalSummary};
use serde::Serialize;
use tracing::info;

use super::emit;
use crate::cli::{OutputFormat, SignalsArgs};

#[derive(Serialize)]
struct SymbolAnalysis {
    symbol: String,
    #[serde(flatten)]
    summary: SignalSummary,
}

#[derive(Serialize)]
struct SignalsOutput {
    analyses: Vec<SymbolAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<SentimentSummary>,
}

fn distinct_symbols(source: &JsonSignalSource) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for signal in source.all() {
        let symbol = signal.symbol.trim().to_ascii_uppercase();
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

pub async fn run(args: SignalsArgs, output: OutputFormat) -> Result<()> {
    let source = JsonSignalSource::from_path(&args.signals)
        .with_context(|| format!("Failed to load signals from {}", args.signals.display()))?;

    let symbols = if args.symbols.is_empty() {
        distinct_symbols(&source)
    } else {
        args.symbols.iter().map(|s| s.trim().to_ascii_uppercase()).collect()
    };

    let mut analyses = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let signals = source.get_signals(&symbol).await?;
        let summary = aggregate_signals(&signals);
        info!(
            symbol = %symbol,
            signals = signals.len(),
            recommendation = %summary.recommendation,
            "Signals analyzed"
        );
        analyses.push(SymbolAnalysis { symbol, summary });
    }

    let sentiment = args.sentiment.then(|| assess_sentiment(&default_factors()));

    emit(output, SignalsOutput { analyses, sentiment }, |out| {
        out.analyses
            .iter()
            .enumerate()
            .map(|(i, a)| {
                // Sentiment is market-wide; show it once
                let sentiment = if i == 0 { out.sentiment.as_ref() } else { None };
                signal_summary(&a.symbol, &a.summary, sentiment)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
