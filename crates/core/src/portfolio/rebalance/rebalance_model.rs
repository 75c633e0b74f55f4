use serde::Serialize;

use crate::catalog::SubstitutionRole;
use crate::portfolio::allocation::RebalanceAction;
use crate::portfolio::reconciliation::{GroupSummary, PortfolioSummary};
use crate::portfolio::state::PortfolioState;

/// One instrument's line in the rebalance report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRow {
    pub group: String,
    pub id: String,
    pub name: String,
    pub asset_class: String,
    pub role: SubstitutionRole,
    /// Sleeve weight for combined members, own weight otherwise
    pub weight_pct: f64,
    pub target_value: f64,
    /// `None` when no usable price was available
    pub price: Option<f64>,
    pub calculated_quantity: f64,
    pub purchase_quantity: u64,
    pub actual_purchase_value: f64,
    pub actual_purchase_pct: f64,
    pub held_quantity: u64,
    pub rebalance_delta: i64,
    pub action: RebalanceAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceReport {
    pub total_balance: f64,
    pub rows: Vec<InstrumentRow>,
    /// One entry per combined sleeve
    pub group_summaries: Vec<GroupSummary>,
    pub summary: PortfolioSummary,
}

/// Report plus the state the caller should keep for the next pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceOutcome {
    pub report: RebalanceReport,
    pub next_state: PortfolioState,
}
