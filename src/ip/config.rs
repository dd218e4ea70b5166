//! Subnet algebra (C8): network/broadcast computation, host ranges, division,
//! and merge, for both address families.
//!
//! `IPv4HostConfig`/`IPv6HostConfig` pair a single address with a mask and
//! derive its network id and IANA type. `IPv4SubnetConfig`/`IPv6SubnetConfig`
//! extend that with range and division/merge operations, re-anchoring the
//! stored address to the network id (spec §4.8: a subnet's `addr` is always
//! its network id, not the host address it was constructed from).

use crate::binary::bit_iter;
use crate::error::{NetlinksError, Result};
use crate::ip::addr::{IPv4Addr, IPv6Addr};
use crate::ip::classify_host::{classify_ipv4, classify_ipv6, IPv4AddrType, IPv6AddrType};
use crate::ip::classify_subnet::{classify_ipv4_subnet, classify_ipv6_subnet};
use crate::ip::mask::{IPv4NetMask, IPv6NetMask};

/// An IPv4 address paired with a netmask, with its network id and IANA type
/// precomputed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IPv4HostConfig {
    addr: IPv4Addr,
    mask: IPv4NetMask,
    network_id: IPv4Addr,
    broadcast_ip: IPv4Addr,
    ip_type: IPv4AddrType,
}

impl IPv4HostConfig {
    /// Builds a host config from an already-parsed address and mask.
    pub fn new(addr: IPv4Addr, mask: IPv4NetMask) -> Self {
        let network_id = Self::compute_network_id(&addr, &mask);
        let broadcast_ip = Self::compute_broadcast(&addr, &mask);
        let ip_type = classify_ipv4(&network_id);
        IPv4HostConfig {
            addr,
            mask,
            network_id,
            broadcast_ip,
            ip_type,
        }
    }

    fn compute_network_id(addr: &IPv4Addr, mask: &IPv4NetMask) -> IPv4Addr {
        addr.bitand(&IPv4Addr::new(mask.as_bytes()))
    }

    fn compute_broadcast(addr: &IPv4Addr, mask: &IPv4NetMask) -> IPv4Addr {
        let wildcard = IPv4Addr::new(mask.as_bytes()).not();
        addr.bitor(&wildcard)
    }

    /// The address this config was built from.
    pub fn addr(&self) -> IPv4Addr {
        self.addr
    }

    /// The netmask this config was built from.
    pub fn mask(&self) -> IPv4NetMask {
        self.mask
    }

    /// The subnet's network id (`addr & mask`).
    pub fn network_id(&self) -> IPv4Addr {
        self.network_id
    }

    /// The subnet's broadcast address (`addr | !mask`).
    pub fn broadcast_ip(&self) -> IPv4Addr {
        self.broadcast_ip
    }

    /// The IANA special-purpose type of [`Self::network_id`].
    pub fn ip_type(&self) -> IPv4AddrType {
        self.ip_type
    }

    /// Total address count in the subnet, including network id and broadcast.
    pub fn total_hosts(&self) -> u64 {
        let host_bits = self.mask.as_bytes().iter().map(|b| 8 - b.count_ones()).sum::<u32>();
        1u64 << host_bits
    }

    /// Usable host count, excluding network id and broadcast where they exist.
    pub fn usable_hosts(&self) -> u64 {
        let host_bits = 32 - self.mask.mask_size() as u32;
        match host_bits {
            0 => 1,
            1 => 2,
            n => (1u64 << n) - 2,
        }
    }

    /// Whether [`Self::ip_type`] is [`IPv4AddrType::Unspecified`].
    pub fn is_unspecified(&self) -> bool {
        self.ip_type == IPv4AddrType::Unspecified
    }

    /// Whether [`Self::ip_type`] is [`IPv4AddrType::Public`].
    pub fn is_public(&self) -> bool {
        self.ip_type == IPv4AddrType::Public
    }

    /// Whether [`Self::ip_type`] is [`IPv4AddrType::Private`].
    pub fn is_private(&self) -> bool {
        self.ip_type == IPv4AddrType::Private
    }
}

/// An IPv4 subnet: a host config re-anchored to its network id, with range,
/// division, and merge operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IPv4SubnetConfig {
    host: IPv4HostConfig,
}

impl IPv4SubnetConfig {
    /// Builds a subnet config, re-anchoring `addr` to its network id.
    pub fn new(addr: IPv4Addr, mask: IPv4NetMask) -> Self {
        let host = IPv4HostConfig::new(addr, mask);
        let network_id = host.network_id();
        IPv4SubnetConfig {
            host: IPv4HostConfig::new(network_id, mask),
        }
    }

    /// The subnet's netmask.
    pub fn mask(&self) -> IPv4NetMask {
        self.host.mask()
    }

    /// The subnet's network id.
    pub fn network_id(&self) -> IPv4Addr {
        self.host.network_id()
    }

    /// The subnet's broadcast address.
    pub fn broadcast_ip(&self) -> IPv4Addr {
        self.host.broadcast_ip()
    }

    /// Total address count, including network id and broadcast.
    pub fn total_hosts(&self) -> u64 {
        self.host.total_hosts()
    }

    /// Usable host count, excluding network id and broadcast where they exist.
    pub fn usable_hosts(&self) -> u64 {
        self.host.usable_hosts()
    }

    /// First usable host. Per RFC 3021, a /31 has no network/broadcast
    /// distinction and uses both addresses as hosts; a /32 has none.
    pub fn first_host(&self) -> Result<IPv4Addr> {
        match self.mask().mask_size() {
            32 => Err(NetlinksError::invalid_argument("no hosts available for a /32 subnet")),
            31 => Ok(self.network_id()),
            _ => self.get_hosts().next().ok_or_else(|| {
                NetlinksError::invalid_argument("no hosts available in this subnet")
            }),
        }
    }

    /// Last usable host, mirroring [`Self::first_host`]'s /31 and /32 handling.
    pub fn last_host(&self) -> Result<IPv4Addr> {
        match self.mask().mask_size() {
            32 => Err(NetlinksError::invalid_argument("no hosts available for a /32 subnet")),
            31 => Ok(self.broadcast_ip()),
            _ => Ok(IPv4Addr::from_decimal(self.broadcast_ip().as_decimal() - 1)),
        }
    }

    /// `[network_id, broadcast_ip]`.
    pub fn subnet_range(&self) -> [IPv4Addr; 2] {
        [self.network_id(), self.broadcast_ip()]
    }

    /// Every IANA special-purpose type this subnet overlaps.
    pub fn ip_types(&self) -> Vec<IPv4AddrType> {
        classify_ipv4_subnet(self)
    }

    /// Lazily yields every usable host address (excludes network id and
    /// broadcast, except where the subnet is too small to have any).
    pub fn get_hosts(&self) -> impl Iterator<Item = IPv4Addr> {
        let start = self.network_id().as_decimal().saturating_add(1);
        let end = self.broadcast_ip().as_decimal();
        (start..end).map(IPv4Addr::from_decimal)
    }

    /// Canonical containment test: `(addr & mask) == network_id`.
    pub fn is_within(&self, addr: &IPv4Addr) -> bool {
        addr.bitand(&IPv4Addr::new(self.mask().as_bytes())) == self.network_id()
    }

    /// Splits this subnet into `2^(target_prefix - current_prefix)` subnets of
    /// `target_prefix` length.
    pub fn division(&self, target_prefix: u8) -> Result<Vec<IPv4SubnetConfig>> {
        let current = self.mask().mask_size();
        if target_prefix <= current || target_prefix > 32 {
            return Err(NetlinksError::invalid_argument(format!(
                "target mask must be in the range of {}-32",
                current + 1
            )));
        }
        let target_mask = IPv4NetMask::from_prefix_len(target_prefix)?;
        let mask_diff = target_prefix - current;
        let host_bits = 32 - target_prefix as u32;
        let base = self.network_id().as_decimal();
        Ok((0u32..(1u32 << mask_diff))
            .map(|shift| {
                let new_network_id = (shift << host_bits) | base;
                IPv4SubnetConfig::new(IPv4Addr::from_decimal(new_network_id), target_mask)
            })
            .collect())
    }

    /// Merges this subnet with others into their common supernet, if and only
    /// if the set of subnets exactly tiles that supernet (no gaps, no overlap
    /// beyond what the subnets themselves cover).
    pub fn merge(&self, others: &[IPv4SubnetConfig]) -> Result<IPv4SubnetConfig> {
        let mut all = vec![*self];
        all.extend_from_slice(others);
        let largest = all.iter().map(|s| s.mask().mask_size()).max().unwrap();
        let smallest = all.iter().map(|s| s.mask().mask_size()).min().unwrap();

        let mut target_prefix = 0u8;
        'bits: for i in 0..smallest {
            let bit = bit_iter(&all[0].network_id().as_bytes()).nth(i as usize).unwrap();
            for s in &all[1..] {
                if bit_iter(&s.network_id().as_bytes()).nth(i as usize).unwrap() != bit {
                    break 'bits;
                }
            }
            target_prefix = i + 1;
        }

        let repeat = (largest - target_prefix) as u32;
        let required: u64 = 1u64 << repeat;

        let mut covered = std::collections::HashSet::new();
        for s in &all {
            for combo in expand_combo_v4(&s.network_id(), &s.mask(), target_prefix, largest) {
                covered.insert(combo);
            }
        }

        if covered.len() as u64 == required {
            let merged_mask = IPv4NetMask::from_prefix_len(target_prefix)?;
            Ok(IPv4SubnetConfig::new(all[0].network_id(), merged_mask))
        } else {
            Err(NetlinksError::MergeFailure)
        }
    }
}

/// Expands the `[target_prefix, largest)` bit window of a subnet's network id
/// into every combination its own host bits in that window can take, encoded
/// as a big-endian bit string for set membership.
fn expand_combo_v4(network_id: &IPv4Addr, mask: &IPv4NetMask, target_prefix: u8, largest: u8) -> Vec<u64> {
    let net_bits: Vec<u8> = bit_iter(&network_id.as_bytes()).collect();
    let mask_size = mask.mask_size();
    let window: Vec<(u8, bool)> = (target_prefix..largest)
        .map(|i| (net_bits[i as usize], i < mask_size))
        .collect();
    let free_positions: Vec<usize> = window
        .iter()
        .enumerate()
        .filter(|(_, (_, fixed))| !fixed)
        .map(|(idx, _)| idx)
        .collect();

    let mut combos = Vec::new();
    for variant in 0u64..(1u64 << free_positions.len()) {
        let mut value = 0u64;
        let mut free_idx = 0;
        for (idx, (bit, fixed)) in window.iter().enumerate() {
            let b = if *fixed {
                *bit as u64
            } else {
                let v = (variant >> free_idx) & 1;
                free_idx += 1;
                v
            };
            value = (value << 1) | b;
            let _ = idx;
        }
        combos.push(value);
    }
    combos
}

/// An IPv6 address paired with a netmask, with its network id and IANA type
/// precomputed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IPv6HostConfig {
    addr: IPv6Addr,
    mask: IPv6NetMask,
    network_id: IPv6Addr,
    ip_type: IPv6AddrType,
}

impl IPv6HostConfig {
    /// Builds a host config from an already-parsed address and mask.
    pub fn new(addr: IPv6Addr, mask: IPv6NetMask) -> Self {
        let network_id = addr.bitand(&IPv6Addr::new(mask.as_bytes()));
        let ip_type = classify_ipv6(&network_id);
        IPv6HostConfig {
            addr,
            mask,
            network_id,
            ip_type,
        }
    }

    /// The address this config was built from.
    pub fn addr(&self) -> IPv6Addr {
        self.addr
    }

    /// The netmask this config was built from.
    pub fn mask(&self) -> IPv6NetMask {
        self.mask
    }

    /// The subnet's network id (`addr & mask`).
    pub fn network_id(&self) -> IPv6Addr {
        self.network_id
    }

    /// The IANA special-purpose type of [`Self::network_id`].
    pub fn ip_type(&self) -> IPv6AddrType {
        self.ip_type
    }

    /// Total address count in the subnet.
    pub fn total_hosts(&self) -> u128 {
        let host_bits = 128 - self.mask.mask_size() as u32;
        if host_bits >= 128 {
            u128::MAX
        } else {
            1u128 << host_bits
        }
    }

    /// Whether [`Self::ip_type`] is [`IPv6AddrType::Unspecified`].
    pub fn is_unspecified(&self) -> bool {
        self.ip_type == IPv6AddrType::Unspecified
    }

    /// Whether [`Self::ip_type`] is [`IPv6AddrType::Loopback`].
    pub fn is_loopback(&self) -> bool {
        self.ip_type == IPv6AddrType::Loopback
    }

    /// Whether [`Self::ip_type`] is [`IPv6AddrType::GlobalUnicast`].
    pub fn is_global_unicast(&self) -> bool {
        self.ip_type == IPv6AddrType::GlobalUnicast
    }
}

/// An IPv6 subnet: a host config re-anchored to its network id, with range,
/// division, and merge operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IPv6SubnetConfig {
    host: IPv6HostConfig,
}

impl IPv6SubnetConfig {
    /// Builds a subnet config, re-anchoring `addr` to its network id.
    pub fn new(addr: IPv6Addr, mask: IPv6NetMask) -> Self {
        let host = IPv6HostConfig::new(addr, mask);
        let network_id = host.network_id();
        IPv6SubnetConfig {
            host: IPv6HostConfig::new(network_id, mask),
        }
    }

    /// The subnet's netmask.
    pub fn mask(&self) -> IPv6NetMask {
        self.host.mask()
    }

    /// The subnet's network id.
    pub fn network_id(&self) -> IPv6Addr {
        self.host.network_id()
    }

    /// Total address count in the subnet.
    pub fn total_hosts(&self) -> u128 {
        self.host.total_hosts()
    }

    /// Highest address in the subnet (all host bits set). IPv6 has no
    /// reserved broadcast address, so this doubles as the last host.
    pub fn last_host(&self) -> IPv6Addr {
        let wildcard = IPv6Addr::new(self.mask().as_bytes()).not();
        self.network_id().bitor(&wildcard)
    }

    /// First host in the subnet; this is the network id since IPv6 has no
    /// reserved network/broadcast distinction.
    pub fn first_host(&self) -> IPv6Addr {
        self.network_id()
    }

    /// `[network_id, last_host]`.
    pub fn subnet_range(&self) -> [IPv6Addr; 2] {
        [self.network_id(), self.last_host()]
    }

    /// Every IANA special-purpose type this subnet overlaps.
    pub fn ip_types(&self) -> Vec<IPv6AddrType> {
        classify_ipv6_subnet(self)
    }

    /// Lazily yields every address in the subnet, network id through last host.
    pub fn get_hosts(&self) -> impl Iterator<Item = IPv6Addr> {
        let start = self.network_id().as_decimal();
        let end = self.last_host().as_decimal();
        let mut current = Some(start);
        std::iter::from_fn(move || match current {
            Some(v) if v <= end => {
                current = if v == end { None } else { Some(v + 1) };
                Some(IPv6Addr::from_decimal(v))
            }
            _ => None,
        })
    }

    /// Canonical containment test: `(addr & mask) == network_id`.
    pub fn is_within(&self, addr: &IPv6Addr) -> bool {
        addr.bitand(&IPv6Addr::new(self.mask().as_bytes())) == self.network_id()
    }

    /// Splits this subnet into `2^(target_prefix - current_prefix)` subnets of
    /// `target_prefix` length.
    pub fn division(&self, target_prefix: u8) -> Result<Vec<IPv6SubnetConfig>> {
        let current = self.mask().mask_size();
        if target_prefix <= current || target_prefix > 128 {
            return Err(NetlinksError::invalid_argument(format!(
                "target mask must be in the range of {}-128",
                current + 1
            )));
        }
        let target_mask = IPv6NetMask::from_prefix_len(target_prefix)?;
        let mask_diff = (target_prefix - current) as u32;
        if mask_diff > 24 {
            return Err(NetlinksError::invalid_argument(
                "division would generate more than 2^24 subnets; narrow the target prefix",
            ));
        }
        let host_bits = 128 - target_prefix as u32;
        let base = self.network_id().as_decimal();
        Ok((0u128..(1u128 << mask_diff))
            .map(|shift| {
                let new_network_id = (shift << host_bits) | base;
                IPv6SubnetConfig::new(IPv6Addr::from_decimal(new_network_id), target_mask)
            })
            .collect())
    }

    /// Merges this subnet with others into their common supernet, if and only
    /// if the set of subnets exactly tiles that supernet.
    pub fn merge(&self, others: &[IPv6SubnetConfig]) -> Result<IPv6SubnetConfig> {
        let mut all = vec![*self];
        all.extend_from_slice(others);
        let largest = all.iter().map(|s| s.mask().mask_size()).max().unwrap();
        let smallest = all.iter().map(|s| s.mask().mask_size()).min().unwrap();

        let mut target_prefix = 0u8;
        'bits: for i in 0..smallest {
            let bit = bit_iter(&all[0].network_id().as_bytes()).nth(i as usize).unwrap();
            for s in &all[1..] {
                if bit_iter(&s.network_id().as_bytes()).nth(i as usize).unwrap() != bit {
                    break 'bits;
                }
            }
            target_prefix = i + 1;
        }

        let repeat = (largest - target_prefix) as u32;
        if repeat > 24 {
            return Err(NetlinksError::invalid_argument(
                "merge span too wide to enumerate (more than 2^24 combinations)",
            ));
        }
        let required: u64 = 1u64 << repeat;

        let mut covered = std::collections::HashSet::new();
        for s in &all {
            for combo in expand_combo_v6(&s.network_id(), &s.mask(), target_prefix, largest) {
                covered.insert(combo);
            }
        }

        if covered.len() as u64 == required {
            let merged_mask = IPv6NetMask::from_prefix_len(target_prefix)?;
            Ok(IPv6SubnetConfig::new(all[0].network_id(), merged_mask))
        } else {
            Err(NetlinksError::MergeFailure)
        }
    }
}

fn expand_combo_v6(network_id: &IPv6Addr, mask: &IPv6NetMask, target_prefix: u8, largest: u8) -> Vec<u64> {
    let net_bits: Vec<u8> = bit_iter(&network_id.as_bytes()).collect();
    let mask_size = mask.mask_size();
    let window: Vec<(u8, bool)> = (target_prefix..largest)
        .map(|i| (net_bits[i as usize], i < mask_size))
        .collect();
    let free_positions: Vec<usize> = window
        .iter()
        .enumerate()
        .filter(|(_, (_, fixed))| !fixed)
        .map(|(idx, _)| idx)
        .collect();

    let mut combos = Vec::new();
    for variant in 0u64..(1u64 << free_positions.len()) {
        let mut value = 0u64;
        let mut free_idx = 0;
        for (bit, fixed) in window.iter() {
            let b = if *fixed {
                *bit as u64
            } else {
                let v = (variant >> free_idx) & 1;
                free_idx += 1;
                v
            };
            value = (value << 1) | b;
        }
        combos.push(value);
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v4_network_and_broadcast() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("192.168.1.77").unwrap(), IPv4NetMask::from_prefix_len(24).unwrap());
        assert_eq!(cfg.network_id().to_string(), "192.168.1.0");
        assert_eq!(cfg.broadcast_ip().to_string(), "192.168.1.255");
        assert_eq!(cfg.total_hosts(), 256);
        assert_eq!(cfg.usable_hosts(), 254);
    }

    #[test]
    fn v4_slash_31_has_no_network_broadcast_distinction() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("10.0.0.0").unwrap(), IPv4NetMask::from_prefix_len(31).unwrap());
        assert_eq!(cfg.first_host().unwrap(), cfg.network_id());
        assert_eq!(cfg.last_host().unwrap(), cfg.broadcast_ip());
    }

    #[test]
    fn v4_slash_32_has_no_hosts() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("10.0.0.1").unwrap(), IPv4NetMask::from_prefix_len(32).unwrap());
        assert!(cfg.first_host().is_err());
    }

    #[test]
    fn v4_division_produces_expected_count() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("192.168.0.0").unwrap(), IPv4NetMask::from_prefix_len(22).unwrap());
        let subnets = cfg.division(24).unwrap();
        assert_eq!(subnets.len(), 4);
        assert_eq!(subnets[0].network_id().to_string(), "192.168.0.0");
        assert_eq!(subnets[3].network_id().to_string(), "192.168.3.0");
    }

    #[test]
    fn v4_merge_reassembles_divided_subnets() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("192.168.0.0").unwrap(), IPv4NetMask::from_prefix_len(22).unwrap());
        let subnets = cfg.division(24).unwrap();
        let merged = subnets[0].merge(&subnets[1..]).unwrap();
        assert_eq!(merged.network_id(), cfg.network_id());
        assert_eq!(merged.mask().mask_size(), 22);
    }

    #[test]
    fn v4_merge_rejects_incomplete_cover() {
        let cfg = IPv4SubnetConfig::new(IPv4Addr::parse("192.168.0.0").unwrap(), IPv4NetMask::from_prefix_len(22).unwrap());
        let subnets = cfg.division(24).unwrap();
        assert!(subnets[0].merge(&subnets[1..2]).is_err());
    }

    #[test]
    fn v6_network_and_last_host() {
        let cfg = IPv6SubnetConfig::new(IPv6Addr::parse("2001:db8::1").unwrap(), IPv6NetMask::from_prefix_len(64).unwrap());
        assert_eq!(cfg.network_id().to_string(), "2001:DB8::");
        assert_eq!(cfg.first_host(), cfg.network_id());
    }
}
