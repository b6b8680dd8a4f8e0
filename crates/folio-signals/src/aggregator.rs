//! Weighted signal aggregation.
//!
//! Each signal contributes `weight * confidence / 100`, where the weight runs
//! from +2 (strong buy) to -2 (strong sell). The mean contribution decides
//! the recommendation through a symmetric dead zone of [-0.5, 0.5]; the mean
//! raw confidence decides the risk tier.

use folio_core::types::{Percent, Recommendation, RiskLevel, TradingSignal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

const BUY_THRESHOLD: Decimal = dec!(0.5);
const SELL_THRESHOLD: Decimal = dec!(-0.5);
const LOW_RISK_CONFIDENCE: Decimal = dec!(80);
const MEDIUM_RISK_CONFIDENCE: Decimal = dec!(60);

/// Confidence limited to 0..=100.
fn bounded_confidence(signal: &TradingSignal) -> Decimal {
    signal
        .confidence
        .value()
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// How many signals fell into each bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalCounts {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub strong: usize,
}

impl SignalCounts {
    fn tally(signals: &[TradingSignal]) -> Self {
        signals.iter().fold(
            Self {
                total: signals.len(),
                ..Self::default()
            },
            |mut counts, s| {
                counts.positive += usize::from(s.signal.is_positive());
                counts.negative += usize::from(s.signal.is_negative());
                counts.strong += usize::from(s.signal.is_strong());
                counts
            },
        )
    }
}

/// Result of aggregating a list of signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub recommendation: Recommendation,
    /// Mean raw confidence of the input signals
    pub confidence: Percent,
    pub risk_level: RiskLevel,
    pub reasoning: String,
    /// Mean of `weight * confidence / 100`
    pub average_weight: Decimal,
    pub counts: SignalCounts,
}

/// Aggregate signals into one recommendation.
///
/// An empty list yields HOLD with zero confidence and HIGH risk. Confidences
/// outside 0..=100 are clamped into that range. The result does not depend on
/// the order of `signals`.
pub fn aggregate_signals(signals: &[TradingSignal]) -> SignalSummary {
    if signals.is_empty() {
        return SignalSummary {
            recommendation: Recommendation::Hold,
            confidence: Percent::ZERO,
            risk_level: RiskLevel::High,
            reasoning: "No signals available for analysis".to_string(),
            average_weight: Decimal::ZERO,
            counts: SignalCounts::default(),
        };
    }

    let count = Decimal::from(signals.len());

    let total_weight: Decimal = signals
        .iter()
        .map(|s| s.signal.weight() * bounded_confidence(s) / Decimal::ONE_HUNDRED)
        .sum();
    let average_weight = total_weight / count;

    let total_confidence: Decimal = signals.iter().map(bounded_confidence).sum();
    let confidence = Percent::new(total_confidence / count);

    let recommendation = recommend(average_weight);
    let risk_level = risk_for(confidence);
    let counts = SignalCounts::tally(signals);
    let reasoning = explain(recommendation, confidence, &counts);

    debug!(
        signals = counts.total,
        %average_weight,
        %confidence,
        %recommendation,
        %risk_level,
        "Signals aggregated"
    );

    SignalSummary {
        recommendation,
        confidence,
        risk_level,
        reasoning,
        average_weight,
        counts,
    }
}

fn recommend(average_weight: Decimal) -> Recommendation {
    if average_weight > BUY_THRESHOLD {
        Recommendation::Buy
    } else if average_weight < SELL_THRESHOLD {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

fn risk_for(confidence: Percent) -> RiskLevel {
    let value = confidence.value();
    if value > LOW_RISK_CONFIDENCE {
        RiskLevel::Low
    } else if value > MEDIUM_RISK_CONFIDENCE {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn explain(recommendation: Recommendation, confidence: Percent, counts: &SignalCounts) -> String {
    let strong = match counts.strong {
        0 => String::new(),
        1 => ", including 1 strong signal".to_string(),
        n => format!(", including {} strong signals", n),
    };

    match recommendation {
        Recommendation::Buy => format!(
            "BUY at {:.1}% average confidence: {} of {} signals are positive{}. \
             Indicators point to an upward trend.",
            confidence.value(),
            counts.positive,
            counts.total,
            strong
        ),
        Recommendation::Sell => format!(
            "SELL at {:.1}% average confidence: {} of {} signals are negative{}. \
             Indicators point to downward pressure.",
            confidence.value(),
            counts.negative,
            counts.total,
            strong
        ),
        Recommendation::Hold => format!(
            "HOLD at {:.1}% average confidence: signals are mixed with {} positive and {} \
             negative of {}. Keep current positions until a clearer trend emerges.",
            confidence.value(),
            counts.positive,
            counts.negative,
            counts.total
        ),
    }
}
