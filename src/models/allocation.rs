//! Allocation result types, shaped like the persisted document.
//!
//! All maps keep insertion order: tiers, zones and accounts are written out in
//! the order they were configured.

use super::Ipv4;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Zone letter → subnet.
pub type ZoneMap = IndexMap<String, Ipv4>;

/// Tier → zone letter → subnet.
pub type SubnetMap = IndexMap<String, ZoneMap>;

/// Result for one account. Field order is the document key order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountAllocation {
    pub cidr: Ipv4,
    pub region: String,
    pub azs: Vec<String>,
    pub subnets: SubnetMap,
    pub azs_region_length: usize,
    pub total_subnets: usize,
    /// Prefix length used for every subnet, `None` when nothing was allocated.
    #[serde(skip)]
    pub subnet_mask: Option<u8>,
}

impl AccountAllocation {
    /// All assigned subnets in tier then zone order.
    pub fn assigned(&self) -> impl Iterator<Item = &Ipv4> {
        self.subnets.values().flat_map(|zones| zones.values())
    }
}

/// Account name → result. Built once per run.
pub type Allocation = IndexMap<String, AccountAllocation>;
