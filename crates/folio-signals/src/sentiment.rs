//! Market sentiment from weighted factors.

use folio_core::types::Percent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

const BULLISH_THRESHOLD: Decimal = dec!(0.1);
const BEARISH_THRESHOLD: Decimal = dec!(-0.1);

/// Direction a factor pushes sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    fn sign(&self) -> Decimal {
        match self {
            Impact::Positive => Decimal::ONE,
            Impact::Negative => Decimal::NEGATIVE_ONE,
            Impact::Neutral => Decimal::ZERO,
        }
    }
}

/// One input to the sentiment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentFactor {
    pub factor: String,
    pub impact: Impact,
    /// Relative weight in [0, 1]
    pub weight: Decimal,
}

impl SentimentFactor {
    pub fn new(factor: impl Into<String>, impact: Impact, weight: Decimal) -> Self {
        Self {
            factor: factor.into(),
            impact,
            weight,
        }
    }
}

/// Overall market mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "BULLISH"),
            Sentiment::Bearish => write!(f, "BEARISH"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub sentiment: Sentiment,
    pub confidence: Percent,
    /// Signed sum of factor weights
    pub net_score: Decimal,
    pub factors: Vec<SentimentFactor>,
}

/// The factors tracked when no others are supplied.
pub fn default_factors() -> Vec<SentimentFactor> {
    vec![
        SentimentFactor::new("Congressional Trading Activity", Impact::Positive, dec!(0.3)),
        SentimentFactor::new("Technical Indicators", Impact::Neutral, dec!(0.25)),
        SentimentFactor::new("Market Volatility", Impact::Negative, dec!(0.2)),
        SentimentFactor::new("Economic Indicators", Impact::Positive, dec!(0.25)),
    ]
}

/// Score sentiment as the signed sum of factor weights.
///
/// Above 0.1 is bullish, below -0.1 bearish. Confidence is the magnitude of
/// the net score expressed as a percentage. The score saturates at the
/// `Decimal` bounds.
pub fn assess_sentiment(factors: &[SentimentFactor]) -> SentimentSummary {
    let net_score = factors
        .iter()
        .map(|f| f.impact.sign() * f.weight)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let sentiment = if net_score > BULLISH_THRESHOLD {
        Sentiment::Bullish
    } else if net_score < BEARISH_THRESHOLD {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    };

    SentimentSummary {
        sentiment,
        confidence: Percent::from_fraction(net_score.abs()),
        net_score,
        factors: factors.to_vec(),
    }
}
