use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::{Result, ValidationError};

/// Outcome of a weight override update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUpdate {
    Applied,
    /// The instrument is a non-first member of a combined sleeve; its
    /// override was stored as 0.
    Ignored,
}

/// User inputs for one session.
///
/// Maps are keyed by catalog identifier. Missing holdings count as 0 and a
/// missing purchase quantity falls back to the engine's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioState {
    /// Evaluation value plus cash
    pub total_balance: f64,
    /// Invested capital; `None` means the total balance is used
    #[serde(default)]
    pub principal: Option<f64>,
    #[serde(default)]
    pub holdings: BTreeMap<String, u64>,
    #[serde(default)]
    pub weight_overrides: BTreeMap<String, f64>,
    #[serde(default)]
    pub purchase_quantities: BTreeMap<String, u64>,
}

fn validate_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be a finite number",
            field
        ))
        .into());
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(())
}

fn validate_weight(id: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        return Err(ValidationError::WeightOutOfRange {
            id: id.to_string(),
            weight,
        }
        .into());
    }
    Ok(())
}

impl PortfolioState {
    /// Fresh state with overrides seeded from the catalog baselines.
    ///
    /// The first member of a combined sleeve gets the sleeve weight and the
    /// other members get 0.
    pub fn new(catalog: &Catalog) -> Self {
        let mut weight_overrides = BTreeMap::new();
        for sleeve in catalog.group_by() {
            for (pos, instrument) in catalog.members(sleeve).enumerate() {
                let weight = if pos == 0 { instrument.weight } else { 0.0 };
                weight_overrides.insert(instrument.id.clone(), weight);
            }
        }

        Self {
            weight_overrides,
            ..Self::default()
        }
    }

    pub fn set_total_balance(&mut self, total_balance: f64) -> Result<()> {
        validate_amount("totalBalance", total_balance)?;
        self.total_balance = total_balance;
        Ok(())
    }

    pub fn set_principal(&mut self, principal: Option<f64>) -> Result<()> {
        if let Some(value) = principal {
            validate_amount("principal", value)?;
        }
        self.principal = principal;
        Ok(())
    }

    /// Principal used for profit figures. Unset falls back to the total balance;
    /// an explicit 0 stays 0.
    pub fn effective_principal(&self) -> f64 {
        self.principal.unwrap_or(self.total_balance)
    }

    pub fn set_holding(&mut self, catalog: &Catalog, id: &str, quantity: u64) -> Result<()> {
        catalog.require(id)?;
        self.holdings.insert(id.to_string(), quantity);
        Ok(())
    }

    pub fn held(&self, id: &str) -> u64 {
        self.holdings.get(id).copied().unwrap_or(0)
    }

    /// Store a weight override for an instrument.
    ///
    /// Setting the first member of a combined sleeve re-zeroes its siblings.
    /// Any other member of a combined sleeve is stored as 0 and reported as
    /// [`WeightUpdate::Ignored`].
    pub fn set_weight_override(
        &mut self,
        catalog: &Catalog,
        id: &str,
        weight: f64,
    ) -> Result<WeightUpdate> {
        validate_weight(id, weight)?;

        let sleeve = catalog.sleeve_of(id)?;
        if !sleeve.is_combined() {
            self.weight_overrides.insert(id.to_string(), weight);
            return Ok(WeightUpdate::Applied);
        }

        if sleeve.first()? != id {
            debug!(
                "Ignoring weight {} for '{}': sleeve '{}' is weighted by its first member",
                weight, id, sleeve.name
            );
            self.weight_overrides.insert(id.to_string(), 0.0);
            return Ok(WeightUpdate::Ignored);
        }

        self.weight_overrides.insert(id.to_string(), weight);
        for sibling in sleeve.members.iter().skip(1) {
            self.weight_overrides.insert(sibling.clone(), 0.0);
        }
        Ok(WeightUpdate::Applied)
    }

    pub fn set_purchase_quantity(
        &mut self,
        catalog: &Catalog,
        id: &str,
        quantity: u64,
    ) -> Result<()> {
        catalog.require(id)?;
        self.purchase_quantities.insert(id.to_string(), quantity);
        Ok(())
    }

    /// Check a state built outside the setters, e.g. deserialized from a request.
    ///
    /// Applies the same rules as the setters: amounts are finite and
    /// non-negative, weights lie in [0, 1], and every key is a catalog identifier.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        validate_amount("totalBalance", self.total_balance)?;
        if let Some(principal) = self.principal {
            validate_amount("principal", principal)?;
        }
        for (id, weight) in &self.weight_overrides {
            validate_weight(id, *weight)?;
            catalog.require(id)?;
        }
        for id in self.holdings.keys().chain(self.purchase_quantities.keys()) {
            catalog.require(id)?;
        }
        Ok(())
    }

    /// Forget planned purchases so the next pass uses engine defaults.
    pub fn clear_purchase_quantities(&mut self) {
        self.purchase_quantities.clear();
    }
}
