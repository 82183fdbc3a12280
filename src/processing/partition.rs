//! Uniform partitioning of a parent block.
//!
//! Sub-blocks are always returned in ascending address order. The planner zips
//! them positionally onto slots, so that order decides which tier and zone end
//! up with which address.

use crate::error::AllocError;
use crate::models::{cut_addr, num_addresses, Ipv4, MAX_LENGTH};
use std::net::Ipv4Addr;

fn ensure_network(parent: Ipv4) -> Result<(), AllocError> {
    let network = cut_addr(parent.addr, parent.mask)?;
    if network != parent.addr {
        return Err(AllocError::invalid_cidr(
            parent.to_string(),
            format!("host bits set, network address is {network}"),
        ));
    }
    Ok(())
}

/// Most subnets the parent can ever be split into (one per address), 0 for a /32.
pub fn capacity(parent: Ipv4) -> u64 {
    if parent.mask >= MAX_LENGTH {
        0
    } else {
        num_addresses(parent.mask)
    }
}

/// Smallest prefix length, strictly longer than the parent's, that yields at
/// least `required` equal sub-blocks.
pub fn minimal_mask(parent: Ipv4, required: usize) -> Result<u8, AllocError> {
    let required = required as u64;
    let base = parent.mask;
    let mut mask = base;
    loop {
        if mask >= MAX_LENGTH {
            return Err(AllocError::Capacity {
                parent,
                required,
                available: capacity(parent),
            });
        }
        mask += 1;
        if 1u64 << (mask - base) >= required {
            return Ok(mask);
        }
    }
}

/// Sub-blocks of `parent` at prefix length `mask`, ascending, produced lazily.
pub fn iter_subnets_at(
    parent: Ipv4,
    mask: u8,
) -> Result<impl Iterator<Item = Ipv4>, AllocError> {
    if mask < parent.mask || mask > MAX_LENGTH {
        return Err(AllocError::shape(format!(
            "subnet prefix /{mask} must be between /{} and /{MAX_LENGTH} for {parent}",
            parent.mask
        )));
    }
    let start = u64::from(u32::from(parent.lo()));
    let step = num_addresses(mask);
    let count = 1u64 << (mask - parent.mask);

    Ok((0..count).map(move |i| Ipv4 {
        addr: Ipv4Addr::from((start + i * step) as u32),
        mask,
    }))
}

/// Every sub-block of `parent` at prefix length `mask`, ascending.
pub fn subnets_at(parent: Ipv4, mask: u8) -> Result<Vec<Ipv4>, AllocError> {
    Ok(iter_subnets_at(parent, mask)?.collect())
}

/// Split `parent` into the smallest uniform sub-blocks that give at least
/// `required` of them.
///
/// All sub-blocks at the chosen prefix are returned, which can be more than
/// `required`; callers take what they need from the front.
pub fn partition(parent: Ipv4, required: usize) -> Result<Vec<Ipv4>, AllocError> {
    ensure_network(parent)?;
    if required == 0 {
        return Ok(Vec::new());
    }
    let mask = minimal_mask(parent, required)?;
    log::debug!(
        "partition {parent} for {required} subnets -> /{mask} ({count} blocks)",
        count = 1u64 << (mask - parent.mask)
    );
    subnets_at(parent, mask)
}

/// Split `parent` at an explicit prefix length, no search.
///
/// Only the first `required` sub-blocks are returned: a short prefix on a wide
/// parent can have billions of them.
pub fn partition_fixed(parent: Ipv4, mask: u8, required: usize) -> Result<Vec<Ipv4>, AllocError> {
    ensure_network(parent)?;
    if mask <= parent.mask || mask > MAX_LENGTH {
        return Err(AllocError::shape(format!(
            "subnet_bits /{mask} must be longer than /{} and at most /{MAX_LENGTH} for {parent}",
            parent.mask
        )));
    }
    let available = 1u64 << (mask - parent.mask);
    if (required as u64) > available {
        return Err(AllocError::Capacity {
            parent,
            required: required as u64,
            available,
        });
    }
    log::debug!("partition {parent} at fixed /{mask} for {required} subnets");
    Ok(iter_subnets_at(parent, mask)?.take(required).collect())
}
