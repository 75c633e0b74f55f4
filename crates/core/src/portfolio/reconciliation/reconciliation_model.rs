use serde::{Deserialize, Serialize};

/// Planned purchases of one sleeve against its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group: String,
    pub target_weight_pct: f64,
    pub target_value: f64,
    /// Sum of planned quantity times price over members with a usable price
    pub actual_value: f64,
    pub actual_weight_pct: f64,
    /// `actual_value - target_value`
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub principal: f64,
    pub total_purchase_amount: f64,
    pub current_value: f64,
    pub profit: f64,
    pub profit_rate_pct: f64,
}
