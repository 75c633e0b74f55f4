//! Session-scoped portfolio state: holdings, overrides and planned purchases.

mod portfolio_state;


pub use portfolio_state::{PortfolioState, WeightUpdate};
