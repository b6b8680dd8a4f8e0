//! Benchmark comparison.
//!
//! A benchmark is a notional position bought with the same amount that was
//! invested in the portfolio. The invested amount and share counts are fixed
//! at acquisition and come from configuration.

use folio_core::error::ValuationError;
use folio_core::types::{Percent, PriceMap, Usd};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A fixed benchmark position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkHolding {
    /// Instrument symbol, e.g. `SPY`
    pub instrument: String,
    /// Amount invested at acquisition
    pub invested: Usd,
    /// Shares bought with `invested`
    pub shares: Decimal,
}

impl BenchmarkHolding {
    pub fn new(instrument: impl Into<String>, invested: Usd, shares: Decimal) -> Self {
        Self {
            instrument: instrument.into(),
            invested,
            shares,
        }
    }

    /// Value the holding at the given price.
    ///
    /// Fails with `DivisionByZero` when nothing was invested and `Overflow`
    /// when the value or return leaves the `Decimal` range.
    pub fn value(&self, price: Usd) -> Result<BenchmarkValuation, ValuationError> {
        let current_value = price.checked_mul(self.shares)?;
        let gain = current_value.checked_sub(self.invested)?;
        let return_percent = Percent::of(gain, self.invested)?;

        Ok(BenchmarkValuation {
            instrument: self.instrument.clone(),
            price,
            current_value,
            gain,
            return_percent,
        })
    }
}

/// The IWM and SPY positions the dashboard tracks by default.
pub fn default_holdings() -> Vec<BenchmarkHolding> {
    vec![
        BenchmarkHolding::new("IWM", Usd::new(dec!(970.67)), dec!(4.406)),
        BenchmarkHolding::new("SPY", Usd::new(dec!(970.67)), dec!(1.527)),
    ]
}

/// A benchmark holding valued at a price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkValuation {
    pub instrument: String,
    pub price: Usd,
    pub current_value: Usd,
    pub gain: Usd,
    pub return_percent: Percent,
}

/// Whether the portfolio beat the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Outperforming,
    Underperforming,
}

/// Portfolio return minus benchmark return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkComparison {
    /// Difference in percentage points
    pub delta: Percent,
    pub direction: Direction,
}

impl fmt::Display for BenchmarkComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Outperforming => write!(f, "Outperforming by +{}", self.delta),
            Direction::Underperforming => write!(f, "Underperforming by {}", self.delta),
        }
    }
}

/// Compare two returns. A delta of exactly zero counts as outperforming.
///
/// The delta saturates at the `Decimal` bounds, which keeps its sign.
pub fn compare_to_benchmark(
    portfolio_return: Percent,
    benchmark_return: Percent,
) -> BenchmarkComparison {
    let delta = portfolio_return.saturating_sub(benchmark_return);
    let direction = if delta >= Percent::ZERO {
        Direction::Outperforming
    } else {
        Direction::Underperforming
    };
    BenchmarkComparison { delta, direction }
}

/// Return of the portfolio relative to the capital it started with.
///
/// `None` when the initial capital is zero or the return does not fit in a
/// `Decimal`.
pub fn portfolio_return(total_value: Usd, initial_capital: Usd) -> Option<Percent> {
    let gain = total_value.checked_sub(initial_capital).ok()?;
    Percent::of(gain, initial_capital).ok()
}

/// One benchmark's valuation and how the portfolio compares to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub benchmark: BenchmarkValuation,
    pub comparison: BenchmarkComparison,
}

/// Compares a portfolio return against a fixed set of benchmark holdings.
#[derive(Debug, Clone)]
pub struct BenchmarkComparator {
    holdings: Vec<BenchmarkHolding>,
}

impl BenchmarkComparator {
    /// Create a comparator for the given holdings.
    pub fn new(holdings: Vec<BenchmarkHolding>) -> Self {
        Self { holdings }
    }

    pub fn holdings(&self) -> &[BenchmarkHolding] {
        &self.holdings
    }

    /// Instruments that need a price.
    pub fn instruments(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.instrument.clone()).collect()
    }

    /// Compare `portfolio_return` against every benchmark that has a price.
    ///
    /// Benchmarks without a quote are skipped, as are holdings whose return
    /// cannot be computed (nothing invested, or out of range).
    pub fn compare(&self, portfolio_return: Percent, prices: &PriceMap) -> Vec<BenchmarkReport> {
        let mut reports = Vec::with_capacity(self.holdings.len());

        for holding in &self.holdings {
            let Some(quote) = prices.get(&holding.instrument) else {
                debug!(instrument = %holding.instrument, "No benchmark price, skipping");
                continue;
            };

            match holding.value(quote.current) {
                Ok(benchmark) => {
                    let comparison =
                        compare_to_benchmark(portfolio_return, benchmark.return_percent);
                    reports.push(BenchmarkReport {
                        benchmark,
                        comparison,
                    });
                }
                Err(e) => {
                    warn!(instrument = %holding.instrument, error = %e, "Benchmark cannot be valued, skipping");
                }
            }
        }

        reports
    }
}

impl Default for BenchmarkComparator {
    fn default() -> Self {
        Self::new(default_holdings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Quote;

    fn usd(amount: Decimal) -> Usd {
        Usd::new(amount)
    }

    fn prices(entries: &[(&str, Decimal)]) -> PriceMap {
        entries
            .iter()
            .map(|(s, p)| (s.to_string(), Quote::new(*s, usd(*p))))
            .collect()
    }

    #[test]
    fn test_holding_value() {
        let holding = BenchmarkHolding::new("SPY", usd(dec!(1000)), dec!(2));
        let valuation = holding.value(usd(dec!(550))).unwrap();

        assert_eq!(valuation.current_value, usd(dec!(1100)));
        assert_eq!(valuation.gain, usd(dec!(100)));
        assert_eq!(valuation.return_percent, Percent::new(dec!(10)));
    }

    #[test]
    fn test_holding_zero_invested() {
        let holding = BenchmarkHolding::new("SPY", Usd::ZERO, dec!(2));
        assert_eq!(
            holding.value(usd(dec!(550))),
            Err(ValuationError::DivisionByZero)
        );
    }

    #[test]
    fn test_holding_value_overflow() {
        let holding = BenchmarkHolding::new("SPY", usd(dec!(970.67)), dec!(100000000000000000));
        assert_eq!(
            holding.value(usd(dec!(1000000000000))),
            Err(ValuationError::Overflow)
        );

        let holding = BenchmarkHolding::new("SPY", usd(dec!(0.0000000000000000001)), dec!(1));
        assert_eq!(
            holding.value(usd(dec!(1000000000000))),
            Err(ValuationError::Overflow)
        );
    }

    #[test]
    fn test_comparator_skips_overflowing_holding() {
        let comparator = BenchmarkComparator::new(vec![
            BenchmarkHolding::new("IWM", usd(dec!(0.0000000000000000001)), dec!(1)),
            BenchmarkHolding::new("SPY", usd(dec!(1000)), dec!(2)),
        ]);
        let reports = comparator.compare(
            Percent::new(dec!(3)),
            &prices(&[("IWM", dec!(1000000000000)), ("SPY", dec!(550))]),
        );

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].benchmark.instrument, "SPY");
    }

    #[test]
    fn test_compare_extreme_returns_keep_direction() {
        let comparison =
            compare_to_benchmark(Percent::new(Decimal::MIN), Percent::new(Decimal::MAX));

        assert_eq!(comparison.delta, Percent::new(Decimal::MIN));
        assert_eq!(comparison.direction, Direction::Underperforming);
    }

    #[test]
    fn test_compare_tie_is_outperforming() {
        let comparison =
            compare_to_benchmark(Percent::new(dec!(5.0)), Percent::new(dec!(5.0)));

        assert_eq!(comparison.delta, Percent::ZERO);
        assert_eq!(comparison.direction, Direction::Outperforming);
    }

    #[test]
    fn test_compare_underperforming() {
        let comparison =
            compare_to_benchmark(Percent::new(dec!(2.5)), Percent::new(dec!(4)));

        assert_eq!(comparison.delta, Percent::new(dec!(-1.5)));
        assert_eq!(comparison.direction, Direction::Underperforming);
        assert_eq!(comparison.to_string(), "Underperforming by -1.50%");
    }

    #[test]
    fn test_compare_outperforming_display() {
        let comparison = compare_to_benchmark(Percent::new(dec!(7)), Percent::new(dec!(4.75)));
        assert_eq!(comparison.to_string(), "Outperforming by +2.25%");
    }

    #[test]
    fn test_portfolio_return() {
        assert_eq!(
            portfolio_return(usd(dec!(1050)), usd(dec!(1000))),
            Some(Percent::new(dec!(5)))
        );
        assert_eq!(portfolio_return(usd(dec!(1050)), Usd::ZERO), None);
        assert_eq!(
            portfolio_return(usd(Decimal::MAX), usd(dec!(0.0000000000000000001))),
            None
        );
    }

    #[test]
    fn test_comparator_skips_unpriced() {
        let comparator = BenchmarkComparator::default();
        let reports = comparator.compare(Percent::new(dec!(3)), &prices(&[("SPY", dec!(640))]));

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.benchmark.instrument, "SPY");
        assert_eq!(report.benchmark.current_value, usd(dec!(977.28)));
        assert_eq!(
            report.comparison.delta,
            Percent::new(dec!(3)) - report.benchmark.return_percent
        );
    }

    #[test]
    fn test_comparator_default_instruments() {
        let comparator = BenchmarkComparator::default();
        assert_eq!(comparator.instruments(), vec!["IWM", "SPY"]);
    }
}
