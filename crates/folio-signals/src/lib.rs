//! Signal analysis.
//!
//! This crate turns lists of weighted trading signals into a single
//! recommendation with a confidence score and risk tier, and scores
//! market sentiment from weighted factors.

mod aggregator;
mod sentiment;

pub use aggregator::{aggregate_signals, SignalCounts, SignalSummary};
pub use sentiment::{assess_sentiment, default_factors, Impact, Sentiment, SentimentFactor, SentimentSummary};
