use std::collections::BTreeMap;

use log::debug;

use super::rebalance_model::{InstrumentRow, RebalanceOutcome, RebalanceReport};
use crate::catalog::Catalog;
use crate::errors::Result;
use crate::portfolio::allocation::{
    compute_allocation, default_purchase_quantity, display_weight, effective_weight_overrides,
    rebalance_delta, RebalanceAction,
};
use crate::portfolio::reconciliation::{group_summary, portfolio_summary};
use crate::portfolio::state::PortfolioState;
use crate::quotes::PriceSnapshot;

/// Run the allocation engine over every instrument and summarize the result.
///
/// The input state is left untouched. The returned `next_state` carries the
/// normalized weight overrides. Purchase quantities the user entered are kept
/// as they are; every other instrument is planned at the engine default for
/// this pass only, so defaults follow later price and balance changes.
pub fn rebalance(
    catalog: &Catalog,
    prices: &PriceSnapshot,
    state: &PortfolioState,
) -> Result<RebalanceOutcome> {
    let mut next_state = state.clone();
    next_state.weight_overrides = effective_weight_overrides(catalog, &state.weight_overrides);

    let total_balance = state.total_balance;
    let mut rows = Vec::with_capacity(catalog.instruments().len());
    let mut planned = BTreeMap::new();

    for instrument in catalog.instruments() {
        let allocation = compute_allocation(
            catalog,
            &instrument.id,
            prices,
            &state.holdings,
            &next_state.weight_overrides,
            total_balance,
        )?;

        let purchase_quantity = state
            .purchase_quantities
            .get(&instrument.id)
            .copied()
            .unwrap_or_else(|| default_purchase_quantity(allocation.target_quantity));
        planned.insert(instrument.id.clone(), purchase_quantity);

        let price = prices.price(&instrument.id);
        let actual_purchase_value = price
            .map(|p| purchase_quantity as f64 * p)
            .unwrap_or(0.0);
        let held_quantity = state.held(&instrument.id);
        let delta = rebalance_delta(purchase_quantity, held_quantity);

        rows.push(InstrumentRow {
            group: instrument.group.clone(),
            id: instrument.id.clone(),
            name: instrument.name.clone(),
            asset_class: instrument.asset_class.clone(),
            role: instrument.role,
            weight_pct: display_weight(catalog, &instrument.id, &next_state.weight_overrides)?
                * 100.0,
            target_value: allocation.target_value,
            price,
            calculated_quantity: allocation.target_quantity,
            purchase_quantity,
            actual_purchase_value,
            actual_purchase_pct: if total_balance > 0.0 {
                actual_purchase_value / total_balance * 100.0
            } else {
                0.0
            },
            held_quantity,
            rebalance_delta: delta,
            action: RebalanceAction::from_delta(delta),
        });
    }

    let group_summaries = catalog
        .group_by()
        .iter()
        .filter(|sleeve| sleeve.is_combined())
        .map(|sleeve| {
            group_summary(
                catalog,
                sleeve,
                prices,
                &planned,
                &next_state.weight_overrides,
                total_balance,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let planned_state = PortfolioState {
        purchase_quantities: planned,
        ..next_state.clone()
    };
    let summary = portfolio_summary(catalog, prices, &planned_state);

    debug!(
        "Rebalanced {} instruments ({} without price), planned purchases {:.0}",
        rows.len(),
        rows.iter().filter(|r| r.price.is_none()).count(),
        summary.total_purchase_amount
    );

    Ok(RebalanceOutcome {
        report: RebalanceReport {
            total_balance,
            rows,
            group_summaries,
            summary,
        },
        next_state,
    })
}
