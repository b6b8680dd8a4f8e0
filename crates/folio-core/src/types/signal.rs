//! Trading signal types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Percent;
use crate::error::ValidationError;

/// Discrete signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalKind {
    /// Aggregation weight, from +2 (strong buy) to -2 (strong sell).
    pub fn weight(self) -> Decimal {
        match self {
            SignalKind::StrongBuy => Decimal::TWO,
            SignalKind::Buy => Decimal::ONE,
            SignalKind::Hold => Decimal::ZERO,
            SignalKind::Sell => Decimal::NEGATIVE_ONE,
            SignalKind::StrongSell => -Decimal::TWO,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::Buy)
    }

    pub fn is_negative(self) -> bool {
        matches!(self, SignalKind::StrongSell | SignalKind::Sell)
    }

    pub fn is_strong(self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::StrongSell)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::StrongBuy => write!(f, "STRONG_BUY"),
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Hold => write!(f, "HOLD"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::StrongSell => write!(f, "STRONG_SELL"),
        }
    }
}

/// Direction reported by a single technical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorSignal {
    Buy,
    Sell,
    Hold,
}

/// A supporting indicator reading. Opaque to aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicator {
    pub name: String,
    pub value: Decimal,
    pub signal: IndicatorSignal,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A trading recommendation for one symbol with a confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    /// Symbol
    pub symbol: String,
    /// Signal category
    pub signal: SignalKind,
    /// Confidence in 0..=100
    pub confidence: Percent,
    /// Supporting indicators
    #[serde(default)]
    pub indicators: Vec<TechnicalIndicator>,
    /// Producer's explanation
    #[serde(default)]
    pub reasoning: String,
    /// When the signal was produced
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TradingSignal {
    /// Create a signal without indicators.
    pub fn new(symbol: impl Into<String>, signal: SignalKind, confidence: Percent) -> Self {
        Self {
            symbol: symbol.into(),
            signal,
            confidence,
            indicators: Vec::new(),
            reasoning: String::new(),
            timestamp: None,
        }
    }

    /// Attach a supporting indicator.
    pub fn with_indicator(mut self, indicator: TechnicalIndicator) -> Self {
        self.indicators.push(indicator);
        self
    }

    /// Set the production timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check the confidence is within 0..=100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let confidence = self.confidence.value();
        if confidence < Decimal::ZERO || confidence > Decimal::ONE_HUNDRED {
            return Err(ValidationError::ConfidenceOutOfRange {
                symbol: self.symbol.clone(),
                confidence,
            });
        }
        Ok(())
    }
}

/// Overall recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Sell => write!(f, "SELL"),
            Recommendation::Hold => write!(f, "HOLD"),
        }
    }
}

/// Risk tier derived from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}
