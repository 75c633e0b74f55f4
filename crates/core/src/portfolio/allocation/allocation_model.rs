use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-instrument output of the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Target amount in the base currency
    pub target_value: f64,
    /// Fractional share count for the target amount; 0 without a usable price
    pub target_quantity: f64,
    /// Value of the current holding; 0 without a usable price
    pub current_value: f64,
    pub price_available: bool,
}

/// What to do with an instrument given its planned and held quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RebalanceAction {
    Buy(u64),
    Sell(u64),
    Hold,
}

impl RebalanceAction {
    pub fn from_delta(delta: i64) -> Self {
        match delta {
            d if d > 0 => RebalanceAction::Buy(d.unsigned_abs()),
            d if d < 0 => RebalanceAction::Sell(d.unsigned_abs()),
            _ => RebalanceAction::Hold,
        }
    }
}

impl fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebalanceAction::Buy(n) => write!(f, "+{} (buy)", n),
            RebalanceAction::Sell(n) => write!(f, "-{} (sell)", n),
            RebalanceAction::Hold => write!(f, "0"),
        }
    }
}

impl From<RebalanceAction> for String {
    fn from(action: RebalanceAction) -> Self {
        action.to_string()
    }
}
