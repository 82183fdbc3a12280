//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 networks with a prefix length,
//! along with the bit helpers the partitioner is built on.

use crate::error::AllocError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Addresses AWS reserves in every subnet (network, router, DNS, future, broadcast).
pub const RESERVED_PER_SUBNET: u64 = 5;

fn too_long(addr: Ipv4Addr, len: u8) -> AllocError {
    AllocError::invalid_cidr(format!("{addr}/{len}"), "Network length is too long")
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use vpc_cidr_blocks::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, AllocError> {
    if len > MAX_LENGTH {
        Err(too_long(Ipv4Addr::UNSPECIFIED, len))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, AllocError> {
    if len > MAX_LENGTH {
        Err(too_long(addr, len))
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, AllocError> {
    let mask = get_cidr_mask(len).map_err(|_| too_long(addr, len))?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of addresses in a block of the given prefix length.
///
/// Returned as u64 since a /0 holds 2^32 addresses.
pub fn num_addresses(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Number of addresses usable by hosts once AWS has taken its reserved five.
///
/// `None` for blocks too small to hold any host.
pub fn usable_hosts(len: u8) -> Option<u64> {
    if len >= MAX_LENGTH - 2 {
        // /30 = 4 IPs, nothing left after the reservation
        None
    } else {
        Some(num_addresses(len) - RESERVED_PER_SUBNET)
    }
}

/// IPv4 network with CIDR notation support.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::network(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Ipv4 {
    type Err = AllocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::network(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Host bits are kept as given; see [`Ipv4::network`] for the strict form.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, AllocError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| AllocError::invalid_cidr(addr_cidr, "expected address/prefix"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| AllocError::invalid_cidr(addr_cidr, format!("invalid address {addr}")))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| AllocError::invalid_cidr(addr_cidr, format!("invalid prefix {mask}")))?;
        if mask > MAX_LENGTH {
            return Err(too_long(addr, mask));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Parse a network address; any host bit set is an error.
    pub fn network(addr_cidr: &str) -> Result<Ipv4, AllocError> {
        let ipv4 = Ipv4::new(addr_cidr)?;
        if ipv4.lo() != ipv4.addr {
            return Err(AllocError::invalid_cidr(
                addr_cidr.trim(),
                format!("host bits set, network address is {}", ipv4.lo()),
            ));
        }
        Ok(ipv4)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let host_bits = !(u32::MAX.checked_shl(u32::from(MAX_LENGTH - self.mask)).unwrap_or(0));
        Ipv4Addr::from(u32::from(self.lo()) | host_bits)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        let net_bits = u32::MAX.checked_shl(u32::from(MAX_LENGTH - self.mask)).unwrap_or(0);
        Ipv4Addr::from(u32::from(self.addr) & net_bits)
    }

    /// Number of addresses covered by this block.
    pub fn size(&self) -> u64 {
        num_addresses(self.mask)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
