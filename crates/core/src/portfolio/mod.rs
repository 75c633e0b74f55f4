pub mod allocation;
pub mod rebalance;
pub mod reconciliation;
pub mod state;

pub use allocation::*;
pub use rebalance::*;
pub use reconciliation::*;
pub use state::*;
