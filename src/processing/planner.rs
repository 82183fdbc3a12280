//! Slot ordering, address assignment and regrouping for one account.
//!
//! Three pure stages:
//! 1. [`build_slots`] lists one slot per (tier, zone) in declared order,
//! 2. [`assign`] zips slots with addresses positionally,
//! 3. [`regroup`] nests the pairs as tier → zone → subnet.
//!
//! [`plan_account`] runs them with a single partitioner call in between.

use super::partition::{partition, partition_fixed};
use crate::error::AllocError;
use crate::models::{AccountAllocation, AccountSpec, Ipv4, Slot, SubnetMap};
use indexmap::map::Entry;

/// Slots in assignment order: tiers as declared, then the first `count` zones
/// of each tier as declared.
pub fn build_slots(spec: &AccountSpec) -> Vec<Slot> {
    spec.tiers
        .iter()
        .flat_map(|demand| {
            spec.zones
                .iter()
                .take(demand.count)
                .enumerate()
                .map(move |(zone_index, zone)| Slot {
                    tier: demand.tier.clone(),
                    zone_index,
                    zone: zone.clone(),
                })
        })
        .collect()
}

/// Pair slot k with subnet k. Extra subnets are dropped.
pub fn assign(slots: Vec<Slot>, subnets: &[Ipv4]) -> Vec<(Slot, Ipv4)> {
    slots.into_iter().zip(subnets.iter().copied()).collect()
}

/// Nest assigned pairs by tier (first occurrence order) then zone.
pub fn regroup(pairs: &[(Slot, Ipv4)]) -> Result<SubnetMap, AllocError> {
    let mut subnets = SubnetMap::new();
    for (slot, subnet) in pairs {
        let zones = subnets.entry(slot.tier.clone()).or_default();
        match zones.entry(slot.zone.clone()) {
            Entry::Occupied(_) => {
                return Err(AllocError::DuplicateSlot {
                    tier: slot.tier.clone(),
                    zone: slot.zone.clone(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(*subnet);
            }
        }
    }
    Ok(subnets)
}

/// Allocate one account. Either every slot gets a subnet or an error is returned.
pub fn plan_account(spec: &AccountSpec) -> Result<AccountAllocation, AllocError> {
    let slots = build_slots(spec);
    let total = slots.len();

    let subnets = match spec.subnet_bits {
        Some(mask) => partition_fixed(spec.parent, mask, total)?,
        None => partition(spec.parent, total)?,
    };
    if subnets.len() < total {
        return Err(AllocError::Capacity {
            parent: spec.parent,
            required: total as u64,
            available: subnets.len() as u64,
        });
    }
    let subnet_mask = subnets.first().map(|s| s.mask);

    let pairs = assign(slots, &subnets);
    let grouped = regroup(&pairs)?;

    log::info!(
        "account '{}' {} -> {} subnets of /{}",
        spec.name,
        spec.parent,
        total,
        subnet_mask.map_or_else(|| "-".to_string(), |m| m.to_string()),
    );

    Ok(AccountAllocation {
        cidr: spec.parent,
        region: spec.region.clone(),
        azs: spec.availability_zones(),
        subnets: grouped,
        azs_region_length: spec.zones.len(),
        total_subnets: total,
        subnet_mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierDemand;

    fn net(s: &str) -> Ipv4 {
        Ipv4::network(s).unwrap()
    }

    fn spec(cidr: &str, tiers: &[(&str, usize)]) -> AccountSpec {
        AccountSpec {
            name: "sandbox".to_string(),
            parent: net(cidr),
            region: "us-east-1".to_string(),
            zones: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            tiers: tiers
                .iter()
                .map(|(tier, count)| TierDemand::new(*tier, *count))
                .collect(),
            subnet_bits: None,
        }
    }

    #[test]
    fn test_build_slots_order() {
        let spec = spec("10.0.0.0/16", &[("public", 3), ("database", 2)]);
        let slots: Vec<String> = build_slots(&spec).iter().map(|s| s.to_string()).collect();
        assert_eq!(
            slots,
            vec!["public/a", "public/b", "public/c", "database/a", "database/b"]
        );
    }

    #[test]
    fn test_build_slots_uses_declared_zone_order() {
        let mut spec = spec("10.0.0.0/16", &[("private", 2)]);
        spec.zones = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let slots = build_slots(&spec);
        assert_eq!(slots[0].zone, "c");
        assert_eq!(slots[1].zone, "a");
        assert_eq!(slots[1].zone_index, 1);
    }

    #[test]
    fn test_assign_takes_front_of_partition() {
        let spec = spec("10.0.0.0/24", &[("public", 3)]);
        let subnets = partition(spec.parent, 3).unwrap();
        let pairs = assign(build_slots(&spec), &subnets);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, net("10.0.0.0/26"));
        assert_eq!(pairs[2].1, net("10.0.0.128/26"));
    }

    #[test]
    fn test_regroup_detects_duplicate_slot() {
        let slot = Slot {
            tier: "public".to_string(),
            zone_index: 0,
            zone: "a".to_string(),
        };
        let pairs = vec![
            (slot.clone(), net("10.0.0.0/25")),
            (slot, net("10.0.0.128/25")),
        ];
        assert_eq!(
            regroup(&pairs).unwrap_err(),
            AllocError::DuplicateSlot {
                tier: "public".to_string(),
                zone: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_plan_example_account() {
        let spec = spec("100.100.0.0/16", &[("public", 3), ("private", 3), ("lambda", 3)]);
        let alloc = plan_account(&spec).unwrap();

        assert_eq!(alloc.total_subnets, 9);
        assert_eq!(alloc.subnet_mask, Some(20));
        assert_eq!(alloc.azs, vec!["us-east-1a", "us-east-1b", "us-east-1c"]);
        assert_eq!(alloc.azs_region_length, 3);
        assert_eq!(
            alloc.subnets.keys().collect::<Vec<_>>(),
            vec!["public", "private", "lambda"]
        );

        let expected = [
            ("public", "a", "100.100.0.0/20"),
            ("public", "b", "100.100.16.0/20"),
            ("public", "c", "100.100.32.0/20"),
            ("private", "a", "100.100.48.0/20"),
            ("private", "b", "100.100.64.0/20"),
            ("private", "c", "100.100.80.0/20"),
            ("lambda", "a", "100.100.96.0/20"),
            ("lambda", "b", "100.100.112.0/20"),
            ("lambda", "c", "100.100.128.0/20"),
        ];
        for (tier, zone, cidr) in expected {
            assert_eq!(alloc.subnets.get(tier).unwrap().get(zone), Some(&net(cidr)));
        }
    }

    #[test]
    fn test_positional_correspondence() {
        let spec = spec("10.8.0.0/14", &[("public", 2), ("private", 3), ("database", 1)]);
        let subnets = partition(spec.parent, spec.total_subnets()).unwrap();
        let alloc = plan_account(&spec).unwrap();
        for (k, (slot, assigned)) in build_slots(&spec)
            .into_iter()
            .zip(alloc.assigned())
            .enumerate()
        {
            assert_eq!(*assigned, subnets[k], "slot {slot}");
            assert_eq!(alloc.subnets.get(&slot.tier).unwrap().get(&slot.zone), Some(&subnets[k]));
        }
        assert_eq!(alloc.assigned().count(), spec.total_subnets());
    }

    #[test]
    fn test_zero_count_tier_is_absent() {
        let spec = spec("10.0.0.0/16", &[("public", 2), ("database", 0)]);
        let alloc = plan_account(&spec).unwrap();
        assert!(!alloc.subnets.contains_key("database"));
        assert_eq!(alloc.total_subnets, 2);
    }

    #[test]
    fn test_no_demand_allocates_nothing() {
        let spec = spec("10.0.0.0/16", &[]);
        let alloc = plan_account(&spec).unwrap();
        assert!(alloc.subnets.is_empty());
        assert_eq!(alloc.subnet_mask, None);
    }

    #[test]
    fn test_fixed_subnet_bits() {
        let mut spec = spec("10.0.0.0/16", &[("public", 3)]);
        spec.subnet_bits = Some(24);
        let alloc = plan_account(&spec).unwrap();
        assert_eq!(alloc.subnet_mask, Some(24));
        assert_eq!(
            alloc.subnets.get("public").unwrap().get("c"),
            Some(&net("10.0.2.0/24"))
        );
    }

    #[test]
    fn test_fixed_host_routes_in_large_parent() {
        let mut spec = spec("10.0.0.0/8", &[("public", 1)]);
        spec.subnet_bits = Some(32);
        let alloc = plan_account(&spec).unwrap();
        assert_eq!(alloc.subnet_mask, Some(32));
        assert_eq!(
            alloc.subnets.get("public").unwrap().get("a"),
            Some(&net("10.0.0.0/32"))
        );
    }

    #[test]
    fn test_capacity_failure_has_no_partial_result() {
        let spec = spec("10.0.0.0/30", &[("public", 3), ("private", 3), ("lambda", 3), ("db", 1)]);
        let err = plan_account(&spec).unwrap_err();
        assert_eq!(
            err,
            AllocError::Capacity {
                parent: net("10.0.0.0/30"),
                required: 10,
                available: 4,
            }
        );
    }
}
