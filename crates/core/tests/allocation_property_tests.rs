//! Property-based integration tests for the allocation engine.
//!
//! Random balances, prices, holdings and overrides are run against the
//! built-in catalog and checked for the invariants the rebalance report
//! promises to its readers.

use std::collections::BTreeMap;

use pension_core::{
    compute_allocation, effective_weight_overrides, rebalance, Catalog, PortfolioState,
    PriceSnapshot,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn builtin() -> Catalog {
    Catalog::builtin().expect("built-in catalog loads")
}

/// A price that is either usable or one of the unusable shapes.
fn arb_price() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        8 => (1.0f64..200_000.0).prop_map(Some),
        1 => Just(None),
        1 => Just(Some(0.0)),
    ]
}

fn arb_prices() -> impl Strategy<Value = PriceSnapshot> {
    let ids = builtin().ids();
    proptest::collection::vec(arb_price(), ids.len())
        .prop_map(move |prices| ids.iter().cloned().zip(prices).collect())
}

fn arb_holdings() -> impl Strategy<Value = BTreeMap<String, u64>> {
    let ids = builtin().ids();
    proptest::collection::vec(0u64..2_000, ids.len())
        .prop_map(move |held| ids.iter().cloned().zip(held).collect())
}

fn arb_overrides() -> impl Strategy<Value = BTreeMap<String, f64>> {
    let ids = builtin().ids();
    proptest::collection::vec(proptest::option::of(0.0f64..=1.0), ids.len()).prop_map(
        move |weights| {
            ids.iter()
                .cloned()
                .zip(weights)
                .filter_map(|(id, w)| w.map(|w| (id, w)))
                .collect()
        },
    )
}

fn arb_balance() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 9 => 0.0f64..1_000_000_000.0]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Simple sleeves target `balance * weight`, with the baseline as default.
    #[test]
    fn prop_simple_sleeve_target_is_balance_times_weight(
        prices in arb_prices(),
        holdings in arb_holdings(),
        overrides in arb_overrides(),
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        for sleeve in catalog.group_by().iter().filter(|s| !s.is_combined()) {
            let id = sleeve.first().unwrap();
            let instrument = catalog.get(id).unwrap();
            let weight = overrides.get(id).copied().unwrap_or(instrument.weight);

            let result = compute_allocation(&catalog, id, &prices, &holdings, &overrides, balance)
                .unwrap();
            prop_assert!(close(result.target_value, balance * weight));

            let baseline = compute_allocation(
                &catalog, id, &prices, &holdings, &BTreeMap::new(), balance,
            )
            .unwrap();
            prop_assert!(close(baseline.target_value, balance * instrument.weight));
        }
    }

    /// Legacy members of combined sleeves target exactly what they hold.
    #[test]
    fn prop_legacy_target_equals_held_value(
        prices in arb_prices(),
        holdings in arb_holdings(),
        overrides in arb_overrides(),
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        for sleeve in catalog.group_by().iter().filter(|s| s.is_combined()) {
            for member in catalog.members(sleeve).filter(|m| !m.is_substitute()) {
                let result = compute_allocation(
                    &catalog, &member.id, &prices, &holdings, &overrides, balance,
                )
                .unwrap();
                let held = holdings.get(&member.id).copied().unwrap_or(0) as f64;
                let expected = prices.price(&member.id).map(|p| held * p).unwrap_or(0.0);
                prop_assert!(close(result.target_value, expected));
            }
        }
    }

    /// Substitutes fill the gap left by legacy members, never going negative.
    #[test]
    fn prop_substitute_target_fills_gap(
        prices in arb_prices(),
        holdings in arb_holdings(),
        overrides in arb_overrides(),
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        for sleeve in catalog.group_by().iter().filter(|s| s.is_combined()) {
            let first = catalog.get(sleeve.first().unwrap()).unwrap();
            let sleeve_weight = overrides.get(&first.id).copied().unwrap_or(first.weight);
            let legacy_value: f64 = catalog
                .members(sleeve)
                .filter(|m| !m.is_substitute())
                .filter_map(|m| {
                    prices
                        .price(&m.id)
                        .map(|p| holdings.get(&m.id).copied().unwrap_or(0) as f64 * p)
                })
                .sum();

            for member in catalog.members(sleeve).filter(|m| m.is_substitute()) {
                let result = compute_allocation(
                    &catalog, &member.id, &prices, &holdings, &overrides, balance,
                )
                .unwrap();
                let expected = (balance * sleeve_weight - legacy_value).max(0.0);
                prop_assert!(result.target_value >= 0.0);
                prop_assert!(close(result.target_value, expected));
            }
        }
    }

    /// Overrides on non-first combined members change nothing.
    #[test]
    fn prop_noise_overrides_are_ignored(
        prices in arb_prices(),
        holdings in arb_holdings(),
        noise in 0.0f64..=1.0,
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        let mut state = PortfolioState::new(&catalog);
        state.set_total_balance(balance).unwrap();
        state.holdings = holdings;

        let clean = rebalance(&catalog, &prices, &state).unwrap();

        let mut noisy = state.clone();
        for sleeve in catalog.group_by().iter().filter(|s| s.is_combined()) {
            for id in sleeve.members.iter().skip(1) {
                noisy.weight_overrides.insert(id.clone(), noise);
            }
        }
        prop_assert_eq!(
            effective_weight_overrides(&catalog, &noisy.weight_overrides),
            effective_weight_overrides(&catalog, &state.weight_overrides)
        );

        let noisy = rebalance(&catalog, &prices, &noisy).unwrap();
        prop_assert_eq!(clean.report, noisy.report);
    }

    /// Every row's delta is planned minus held, with a matching action.
    #[test]
    fn prop_delta_is_planned_minus_held(
        prices in arb_prices(),
        holdings in arb_holdings(),
        overrides in arb_overrides(),
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        let mut state = PortfolioState::new(&catalog);
        state.set_total_balance(balance).unwrap();
        state.holdings = holdings;
        for (id, weight) in &overrides {
            state.set_weight_override(&catalog, id, *weight).unwrap();
        }

        let outcome = rebalance(&catalog, &prices, &state).unwrap();
        for row in &outcome.report.rows {
            let delta = row.purchase_quantity as i64 - row.held_quantity as i64;
            prop_assert_eq!(row.rebalance_delta, delta);
            let action = row.action.to_string();
            if delta > 0 {
                prop_assert!(action.ends_with("(buy)"));
            } else if delta < 0 {
                prop_assert!(action.ends_with("(sell)"));
            } else {
                prop_assert_eq!(action, "0");
            }
            if row.price.is_none() {
                prop_assert_eq!(row.calculated_quantity, 0.0);
            }
        }
    }

    /// The pass is a pure function of its inputs.
    #[test]
    fn prop_rebalance_is_deterministic(
        prices in arb_prices(),
        holdings in arb_holdings(),
        overrides in arb_overrides(),
        balance in arb_balance(),
    ) {
        let catalog = builtin();
        let state = PortfolioState {
            total_balance: balance,
            holdings,
            weight_overrides: overrides,
            ..PortfolioState::default()
        };

        let first = rebalance(&catalog, &prices, &state).unwrap();
        let second = rebalance(&catalog, &prices, &state).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_legacy_covers_developed_sleeve() {
    let catalog = builtin();
    let prices: PriceSnapshot = [("KRX:379800", Some(50_000.0)), ("KRX:360200", Some(20_000.0))]
        .into_iter()
        .collect();
    let holdings: BTreeMap<String, u64> = [("KRX:379800".to_string(), 100)].into_iter().collect();

    let substitute = compute_allocation(
        &catalog,
        "KRX:360200",
        &prices,
        &holdings,
        &BTreeMap::new(),
        10_000_000.0,
    )
    .unwrap();
    assert_eq!(substitute.target_value, 0.0);
    assert_eq!(substitute.target_quantity, 0.0);
}

#[test]
fn scenario_zero_principal_profit() {
    let catalog = builtin();
    let prices: PriceSnapshot = [("KRX:379800", Some(50_000.0))].into_iter().collect();
    let mut state = PortfolioState::new(&catalog);
    state.set_total_balance(10_000_000.0).unwrap();
    state.set_principal(Some(0.0)).unwrap();
    state.set_holding(&catalog, "KRX:379800", 10).unwrap();

    let outcome = rebalance(&catalog, &prices, &state).unwrap();
    assert_eq!(outcome.report.summary.current_value, 500_000.0);
    assert_eq!(outcome.report.summary.profit, 500_000.0);
    assert_eq!(outcome.report.summary.profit_rate_pct, 0.0);
}
