//! Plain-text reports for terminal output.

use folio_core::types::{Order, Percent};
use folio_orders::BuyingPowerCheck;
use folio_signals::{SentimentSummary, SignalSummary};
use folio_valuation::{BenchmarkReport, PerformanceMetrics, PortfolioValuation};

const RULE: &str = "═══════════════════════════════════════════════════════════\n";
const SECTION: &str = "───────────────────────────────────────────────────────────\n";

fn header(s: &mut String, title: &str) {
    s.push_str(RULE);
    s.push_str(&format!("{:^59}\n", title));
    s.push_str(RULE);
    s.push('\n');
}

fn section(s: &mut String, title: &str) {
    s.push_str(title);
    s.push('\n');
    s.push_str(SECTION);
}

fn percent(value: Option<Percent>) -> String {
    match value {
        Some(p) if p.is_negative() => p.to_string(),
        Some(p) => format!("+{}", p),
        None => "n/a".to_string(),
    }
}

/// Portfolio totals followed by one line per position.
pub fn valuation_summary(valuation: &PortfolioValuation, metrics: &PerformanceMetrics) -> String {
    let mut s = String::new();
    header(&mut s, "PORTFOLIO VALUATION");

    section(&mut s, "TOTALS");
    s.push_str(&format!("  Cash:                {}\n", valuation.cash_balance));
    s.push_str(&format!("  Market Value:        {}\n", valuation.market_value));
    s.push_str(&format!("  Total Value:         {}\n", valuation.total_value));
    s.push_str(&format!("  Total Cost:          {}\n", valuation.total_cost));
    s.push_str(&format!(
        "  Unrealized P&L:      {} ({})\n",
        valuation.total_pnl,
        percent(valuation.total_pnl_percent)
    ));
    s.push_str(&format!(
        "  Day Change:          {} ({})\n",
        valuation.day_change,
        percent(valuation.day_change_percent)
    ));
    s.push_str(&format!(
        "  Day Return:          {}\n",
        percent(metrics.day_return_percent)
    ));
    s.push('\n');

    section(&mut s, "POSITIONS");
    if valuation.positions.is_empty() {
        s.push_str("  (none priced)\n");
    }
    for p in &valuation.positions {
        s.push_str(&format!(
            "  {:<6} {:>10} @ {:>12}  value {:>12}  P&L {:>12} ({})\n",
            p.symbol,
            p.quantity,
            p.current_price.to_string(),
            p.market_value.to_string(),
            p.pnl.to_string(),
            percent(p.pnl_percent)
        ));
    }

    if !valuation.skipped.is_empty() {
        s.push('\n');
        s.push_str(&format!(
            "  Not priced (excluded): {}\n",
            valuation.skipped.join(", ")
        ));
    }

    s
}

/// Portfolio return against each benchmark.
pub fn benchmark_summary(portfolio_return: Option<Percent>, reports: &[BenchmarkReport]) -> String {
    let mut s = String::new();
    header(&mut s, "BENCHMARK COMPARISON");

    s.push_str(&format!(
        "  Portfolio Return:    {}\n\n",
        percent(portfolio_return)
    ));

    if reports.is_empty() {
        s.push_str("  No benchmark prices available\n");
        return s;
    }

    for report in reports {
        let b = &report.benchmark;
        section(&mut s, &b.instrument);
        s.push_str(&format!("  Price:               {}\n", b.price));
        s.push_str(&format!("  Current Value:       {}\n", b.current_value));
        s.push_str(&format!(
            "  Return:              {}\n",
            percent(Some(b.return_percent))
        ));
        s.push_str(&format!("  {}\n\n", report.comparison));
    }

    s
}

/// Aggregated recommendation for one symbol.
pub fn signal_summary(
    symbol: &str,
    summary: &SignalSummary,
    sentiment: Option<&SentimentSummary>,
) -> String {
    let mut s = String::new();
    header(&mut s, &format!("SIGNAL ANALYSIS: {}", symbol));

    s.push_str(&format!("  Recommendation:      {}\n", summary.recommendation));
    s.push_str(&format!("  Confidence:          {}\n", summary.confidence));
    s.push_str(&format!("  Risk Level:          {}\n", summary.risk_level));
    s.push_str(&format!(
        "  Signals:             {} ({} positive, {} negative, {} strong)\n\n",
        summary.counts.total,
        summary.counts.positive,
        summary.counts.negative,
        summary.counts.strong
    ));
    s.push_str(&format!("  {}\n", summary.reasoning));

    if let Some(sentiment) = sentiment {
        s.push('\n');
        section(&mut s, "MARKET SENTIMENT");
        s.push_str(&format!(
            "  {} ({} confidence)\n",
            sentiment.sentiment, sentiment.confidence
        ));
        for factor in &sentiment.factors {
            s.push_str(&format!(
                "  {:<32} {:?} {}\n",
                factor.factor, factor.impact, factor.weight
            ));
        }
    }

    s
}

/// An accepted order and its cost estimate.
pub fn order_summary(order: &Order, check: Option<&BuyingPowerCheck>) -> String {
    let mut s = String::new();
    header(&mut s, "ORDER ACCEPTED");

    s.push_str(&format!("  Order ID:            {}\n", order.id));
    s.push_str(&format!(
        "  {} {} {} ({})\n",
        order.side,
        order.quantity,
        order.symbol,
        order.order_type()
    ));
    if let Some(limit) = order.kind.limit_price() {
        s.push_str(&format!("  Limit Price:         {}\n", limit));
    }
    if let Some(stop) = order.kind.stop_price() {
        s.push_str(&format!("  Stop Price:          {}\n", stop));
    }
    s.push_str(&format!("  Time In Force:       {:?}\n", order.time_in_force));
    s.push_str(&format!("  Status:              {:?}\n", order.status));

    if let Some(check) = check {
        s.push_str(&format!("  Estimated Cost:      {}\n", check.estimated_cost));
        s.push_str(&format!("  Buying Power:        {}\n", check.available));
    }

    s
}
