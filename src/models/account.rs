//! Validated account specification and the slots derived from it.

use super::Ipv4;

/// Number of subnets a tier needs, one per zone, taken from the front of the zone list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierDemand {
    pub tier: String,
    pub count: usize,
}

impl TierDemand {
    pub fn new(tier: impl Into<String>, count: usize) -> Self {
        TierDemand {
            tier: tier.into(),
            count,
        }
    }
}

/// One account/environment to carve out of its parent block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSpec {
    /// Account or environment name, unique within a run.
    pub name: String,
    /// VPC block the subnets are cut from.
    pub parent: Ipv4,
    /// Region label, only used to name availability zones.
    pub region: String,
    /// Zone letters in declared order.
    pub zones: Vec<String>,
    /// Tier demand in declared order.
    pub tiers: Vec<TierDemand>,
    /// Explicit subnet prefix length, skips the minimal size search.
    pub subnet_bits: Option<u8>,
}

impl AccountSpec {
    /// Sum of all tier counts.
    pub fn total_subnets(&self) -> usize {
        self.tiers.iter().map(|t| t.count).sum()
    }

    /// Full availability zone names, e.g. `us-east-1a`.
    pub fn availability_zones(&self) -> Vec<String> {
        self.zones
            .iter()
            .map(|zone| format!("{}{}", self.region, zone))
            .collect()
    }
}

/// A (tier, zone) position waiting for exactly one subnet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub tier: String,
    pub zone_index: usize,
    pub zone: String,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.tier, self.zone)
    }
}
