use folio_core::error::ValuationError;
use folio_core::types::{Percent, Position, PriceMap, Quote, Usd};
use folio_valuation::{value_portfolio, value_position, BenchmarkHolding, compare_to_benchmark, Direction};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn cents(amount: i64) -> Usd {
    Usd::new(Decimal::new(amount, 2))
}

fn position_strategy() -> impl Strategy<Value = (Position, Option<(i64, i64)>)> {
    (
        1i64..1_000_000,
        1i64..10_000_000,
        prop::option::of((1i64..10_000_000, 1i64..10_000_000)),
    )
        .prop_map(|(qty_thousandths, cost_cents, price)| {
            (
                Position::new("SYM", Decimal::new(qty_thousandths, 3), cents(cost_cents)),
                price,
            )
        })
}

fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

fn build_book(entries: Vec<(Position, Option<(i64, i64)>)>) -> (Vec<Position>, PriceMap) {
    let mut positions = Vec::with_capacity(entries.len());
    let mut prices = PriceMap::new();

    for (idx, (mut position, price)) in entries.into_iter().enumerate() {
        position.symbol = format!("S{}", idx);
        if let Some((current, previous)) = price {
            prices.insert(
                position.symbol.clone(),
                Quote::new(position.symbol.clone(), cents(current))
                    .with_previous_close(cents(previous)),
            );
        }
        positions.push(position);
    }

    (positions, prices)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn position_pnl_identities_hold((position, _) in position_strategy(), price in 1i64..10_000_000) {
        let valuation = value_position(&position, cents(price)).unwrap();

        prop_assert_eq!(valuation.pnl, valuation.market_value - valuation.cost_basis);
        prop_assert_eq!(
            valuation.pnl_percent,
            Some(Percent::of(valuation.pnl, valuation.cost_basis).unwrap())
        );
    }

    #[test]
    fn totals_cover_only_priced_positions(
        entries in prop::collection::vec(position_strategy(), 0..20),
        cash in 0i64..100_000_000,
    ) {
        let (positions, prices) = build_book(entries);
        let valuation = value_portfolio(&positions, &prices, cents(cash)).unwrap();

        let priced: Vec<&Position> = positions
            .iter()
            .filter(|p| prices.contains_key(&p.symbol))
            .collect();
        let expected_value: Usd = priced
            .iter()
            .map(|p| p.market_value(prices[&p.symbol].current).unwrap())
            .sum();

        prop_assert_eq!(valuation.included_count(), priced.len());
        prop_assert_eq!(valuation.skipped.len(), positions.len() - priced.len());
        prop_assert_eq!(valuation.total_value, cents(cash) + expected_value);
        prop_assert_eq!(valuation.total_pnl, valuation.market_value - valuation.total_cost);
    }

    #[test]
    fn valuation_is_deterministic(
        entries in prop::collection::vec(position_strategy(), 0..20),
        cash in 0i64..100_000_000,
    ) {
        let (positions, prices) = build_book(entries);

        let first = value_portfolio(&positions, &prices, cents(cash));
        let second = value_portfolio(&positions, &prices, cents(cash));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn valuation_of_any_decimals_returns_instead_of_panicking(
        quantity in any_decimal(),
        average_cost in any_decimal(),
        current in any_decimal(),
        previous_close in any_decimal(),
        cash in any_decimal(),
    ) {
        let positions = vec![Position::new("ANY", quantity, Usd::new(average_cost))];
        let prices: PriceMap = [(
            "ANY".to_string(),
            Quote::new("ANY", Usd::new(current)).with_previous_close(Usd::new(previous_close)),
        )]
        .into_iter()
        .collect();

        // Either outcome is fine; reaching the assertion is the property
        let result = value_portfolio(&positions, &prices, Usd::new(cash));
        prop_assert!(result.is_ok() || result == Err(ValuationError::Overflow));

        let holding = BenchmarkHolding::new("ANY", Usd::new(average_cost), quantity);
        let _ = holding.value(Usd::new(current));
    }

    #[test]
    fn comparison_direction_follows_delta_sign(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let portfolio = Percent::new(Decimal::new(a, 2));
        let benchmark = Percent::new(Decimal::new(b, 2));
        let comparison = compare_to_benchmark(portfolio, benchmark);

        let expected = if a >= b { Direction::Outperforming } else { Direction::Underperforming };
        prop_assert_eq!(comparison.direction, expected);
        prop_assert_eq!(comparison.delta, portfolio - benchmark);
    }

    #[test]
    fn benchmark_gain_matches_value(invested in 1i64..10_000_000, shares in 1i64..100_000, price in 1i64..10_000_000) {
        let holding = BenchmarkHolding::new("SPY", cents(invested), Decimal::new(shares, 3));
        let valuation = holding.value(cents(price)).unwrap();

        prop_assert_eq!(valuation.gain, valuation.current_value - cents(invested));
        prop_assert_eq!(valuation.return_percent, Percent::of(valuation.gain, cents(invested)).unwrap());
    }
}
