//! Group and portfolio level summaries over per-instrument results.

mod reconciliation_calculator;
mod reconciliation_model;


pub use reconciliation_calculator::{group_summary, portfolio_summary};
pub use reconciliation_model::{GroupSummary, PortfolioSummary};
