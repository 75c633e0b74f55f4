//! Allocation engine: target values, share counts and buy/sell deltas.

mod allocation_calculator;
mod allocation_model;


pub use allocation_calculator::{
    combined_sleeve_target, compute_allocation, default_purchase_quantity, display_weight,
    effective_weight_overrides, rebalance_delta, sleeve_weight,
};
pub use allocation_model::{AllocationResult, RebalanceAction};
