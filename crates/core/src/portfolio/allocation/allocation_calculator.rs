use std::collections::BTreeMap;

use log::debug;

use super::allocation_model::AllocationResult;
use crate::catalog::{Catalog, Instrument, Sleeve, SubstitutionRole};
use crate::errors::Result;
use crate::quotes::PriceSnapshot;

/// Target value of one member of a combined sleeve.
///
/// The substitute absorbs whatever the legacy members do not already cover,
/// never going below zero. Legacy members hold steady at their current value.
///
/// * `sleeve_target_value` - total balance times the sleeve weight
/// * `legacy_held_value` - value of all legacy members with a usable price
/// * `own_held_value` - value of this member's holding, 0 without a price
pub fn combined_sleeve_target(
    role: SubstitutionRole,
    sleeve_target_value: f64,
    legacy_held_value: f64,
    own_held_value: f64,
) -> f64 {
    match role {
        SubstitutionRole::Substitute => (sleeve_target_value - legacy_held_value).max(0.0),
        SubstitutionRole::Legacy => own_held_value,
    }
}

fn usable_override(overrides: &BTreeMap<String, f64>, id: &str) -> Option<f64> {
    overrides
        .get(id)
        .copied()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

/// Weight actually used for a sleeve or simple instrument.
fn weight_for(instrument: &Instrument, overrides: &BTreeMap<String, f64>) -> f64 {
    usable_override(overrides, &instrument.id).unwrap_or(instrument.weight)
}

/// Normalize user overrides against the catalog.
///
/// Non-first combined members are forced to 0. Negative or non-finite
/// overrides are dropped so the baseline applies. Unknown ids are dropped.
pub fn effective_weight_overrides(
    catalog: &Catalog,
    overrides: &BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    let mut effective = BTreeMap::new();

    for sleeve in catalog.group_by() {
        for (pos, instrument) in catalog.members(sleeve).enumerate() {
            let Some(&raw) = overrides.get(&instrument.id) else {
                continue;
            };

            if sleeve.is_combined() && pos > 0 {
                if raw != 0.0 {
                    debug!(
                        "Discarding weight {} for '{}': sleeve '{}' is weighted by its first member",
                        raw, instrument.id, sleeve.name
                    );
                }
                effective.insert(instrument.id.clone(), 0.0);
                continue;
            }

            match usable_override(overrides, &instrument.id) {
                Some(weight) => {
                    effective.insert(instrument.id.clone(), weight);
                }
                None => debug!(
                    "Dropping invalid weight {} for '{}', using baseline {}",
                    raw, instrument.id, instrument.weight
                ),
            }
        }
    }

    effective
}

/// Effective weight of a sleeve: the first member's override, else its baseline.
pub fn sleeve_weight(
    catalog: &Catalog,
    sleeve: &Sleeve,
    overrides: &BTreeMap<String, f64>,
) -> Result<f64> {
    let first = catalog.require(sleeve.first()?)?;
    Ok(weight_for(first, overrides))
}

/// Weight shown for an instrument: the sleeve weight for combined members,
/// the instrument's own effective weight otherwise.
pub fn display_weight(
    catalog: &Catalog,
    id: &str,
    overrides: &BTreeMap<String, f64>,
) -> Result<f64> {
    let sleeve = catalog.sleeve_of(id)?;
    sleeve_weight(catalog, sleeve, overrides)
}

/// Value of all legacy members of a sleeve that have a usable price.
fn legacy_held_value(
    catalog: &Catalog,
    sleeve: &Sleeve,
    prices: &PriceSnapshot,
    holdings: &BTreeMap<String, u64>,
) -> f64 {
    catalog
        .members(sleeve)
        .filter(|member| !member.is_substitute())
        .filter_map(|member| {
            prices
                .price(&member.id)
                .map(|price| held(holdings, &member.id) as f64 * price)
        })
        .sum()
}

fn held(holdings: &BTreeMap<String, u64>, id: &str) -> u64 {
    holdings.get(id).copied().unwrap_or(0)
}

/// Compute the target allocation for one instrument.
///
/// Simple sleeves get `total_balance * weight`. Combined sleeves split the
/// sleeve target through [`combined_sleeve_target`]. Without a usable price
/// the quantity is 0 and `price_available` is false.
pub fn compute_allocation(
    catalog: &Catalog,
    instrument_id: &str,
    prices: &PriceSnapshot,
    holdings: &BTreeMap<String, u64>,
    weight_overrides: &BTreeMap<String, f64>,
    total_balance: f64,
) -> Result<AllocationResult> {
    let instrument = catalog.require(instrument_id)?;
    let sleeve = catalog.sleeve(&instrument.group)?;
    let price = prices.price(instrument_id);
    let current_value = price
        .map(|p| held(holdings, instrument_id) as f64 * p)
        .unwrap_or(0.0);

    let target_value = if sleeve.is_combined() {
        let sleeve_target_value = total_balance * sleeve_weight(catalog, sleeve, weight_overrides)?;
        let legacy_value = legacy_held_value(catalog, sleeve, prices, holdings);
        combined_sleeve_target(
            instrument.role,
            sleeve_target_value,
            legacy_value,
            current_value,
        )
    } else {
        total_balance * weight_for(instrument, weight_overrides)
    };

    let target_quantity = price.map(|p| target_value / p).unwrap_or(0.0);

    Ok(AllocationResult {
        target_value,
        target_quantity,
        current_value,
        price_available: price.is_some(),
    })
}

/// Planned purchase quantity when the user has not entered one.
pub fn default_purchase_quantity(calculated_quantity: f64) -> u64 {
    if calculated_quantity.is_finite() && calculated_quantity > 0.0 {
        calculated_quantity.trunc() as u64
    } else {
        0
    }
}

/// Planned minus held. Positive is a buy, negative a sell.
pub fn rebalance_delta(planned: u64, held: u64) -> i64 {
    let delta = i128::from(planned) - i128::from(held);
    delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
