//! Domain models for VPC CIDR allocation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`AccountSpec`] and [`Slot`] - what an account asks for
//! - [`AccountAllocation`] and [`Allocation`] - what it gets

mod account;
mod allocation;
mod ipv4;

// Re-export public types
pub use account::{AccountSpec, Slot, TierDemand};
pub use allocation::{AccountAllocation, Allocation, SubnetMap, ZoneMap};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, num_addresses, usable_hosts, Ipv4, MAX_LENGTH,
    RESERVED_PER_SUBNET,
};
