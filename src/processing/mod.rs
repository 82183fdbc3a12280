//! Allocation logic.
//!
//! This module contains the address math and assignment rules:
//! - [`partition`] - Uniform splitting of a parent block
//! - [`planner`] - Slot ordering and tier/zone assignment for one account
//! - [`run`] - Per-account outcomes for a whole configuration

pub mod partition;
pub mod planner;
pub mod run;

// Re-export public functions
pub use partition::{
    capacity, iter_subnets_at, minimal_mask, partition, partition_fixed, subnets_at,
};
pub use planner::{assign, build_slots, plan_account, regroup};
pub use run::{allocate, AccountFailure, PlanReport};
