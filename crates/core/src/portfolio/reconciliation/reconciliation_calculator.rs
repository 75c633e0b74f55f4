use std::collections::BTreeMap;

use super::reconciliation_model::{GroupSummary, PortfolioSummary};
use crate::catalog::{Catalog, Sleeve};
use crate::errors::Result;
use crate::portfolio::allocation::sleeve_weight;
use crate::portfolio::state::PortfolioState;
use crate::quotes::PriceSnapshot;

fn pct_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

fn planned_value(prices: &PriceSnapshot, quantities: &BTreeMap<String, u64>, id: &str) -> f64 {
    match (prices.price(id), quantities.get(id)) {
        (Some(price), Some(&quantity)) => quantity as f64 * price,
        _ => 0.0,
    }
}

/// Compare a sleeve's planned purchases with its target value.
pub fn group_summary(
    catalog: &Catalog,
    sleeve: &Sleeve,
    prices: &PriceSnapshot,
    purchase_quantities: &BTreeMap<String, u64>,
    weight_overrides: &BTreeMap<String, f64>,
    total_balance: f64,
) -> Result<GroupSummary> {
    let target_value = total_balance * sleeve_weight(catalog, sleeve, weight_overrides)?;
    let actual_value: f64 = sleeve
        .members
        .iter()
        .map(|id| planned_value(prices, purchase_quantities, id))
        .sum();

    Ok(GroupSummary {
        group: sleeve.name.clone(),
        target_weight_pct: pct_of(target_value, total_balance),
        target_value,
        actual_value,
        actual_weight_pct: pct_of(actual_value, total_balance),
        difference: actual_value - target_value,
    })
}

/// Totals over every catalog instrument.
///
/// The principal falls back to the total balance when unset. A principal of 0
/// reports the whole current value as profit with a profit rate of 0.
pub fn portfolio_summary(
    catalog: &Catalog,
    prices: &PriceSnapshot,
    state: &PortfolioState,
) -> PortfolioSummary {
    let mut total_purchase_amount = 0.0;
    let mut current_value = 0.0;

    for instrument in catalog.instruments() {
        let Some(price) = prices.price(&instrument.id) else {
            continue;
        };
        total_purchase_amount += planned_value(prices, &state.purchase_quantities, &instrument.id);
        current_value += state.held(&instrument.id) as f64 * price;
    }

    let principal = state.effective_principal();
    let profit = current_value - principal;

    PortfolioSummary {
        principal,
        total_purchase_amount,
        current_value,
        profit,
        profit_rate_pct: pct_of(profit, principal),
    }
}
