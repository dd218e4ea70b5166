//! Host/subnet/wildcard factories (C9): single and batch construction from
//! text, plus type-directed random generation.
//!
//! Batch construction fans out over `std::thread::scope` rather than a thread
//! pool crate — the teacher never pulls in one for this kind of bounded, short-
//! lived parallel work, and a scoped spawn gives the same borrow-safety a pool
//! would without the extra dependency.

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::Result;
use crate::ip::addr::{IPv4Addr, IPv6Addr};
use crate::ip::classify_host::{self, IPv4AddrType, IPv6AddrType};
use crate::ip::config::{IPv4HostConfig, IPv4SubnetConfig, IPv6HostConfig, IPv6SubnetConfig};
use crate::ip::mask::{IPv4NetMask, IPv6NetMask};
use crate::ip::standardize;
use crate::ip::wildcard::{IPv4WildcardConfig, IPv6WildcardConfig};

const DEFAULT_WORKERS: usize = 10;

/// Dedup policy for batch construction. Dedup is by input string, not by
/// parsed value, and sorts the surviving inputs for a deterministic output
/// order regardless of how threads finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dedup {
    /// Keep every input, duplicates included.
    Keep,
    /// Drop duplicate inputs before construction.
    Drop,
}

fn prepare_inputs<'a>(inputs: &[&'a str], dedup: Dedup) -> Vec<&'a str> {
    match dedup {
        Dedup::Keep => inputs.to_vec(),
        Dedup::Drop => {
            let set: BTreeSet<&str> = inputs.iter().copied().collect();
            log::trace!("batch dedup dropped {} of {} inputs", inputs.len() - set.len(), inputs.len());
            set.into_iter().collect()
        }
    }
}

fn run_batch<'a, T, F>(inputs: &[&'a str], max_workers: usize, f: F) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(&str) -> Result<T> + Sync,
{
    let workers = max_workers.max(1).min(inputs.len().max(1));
    let chunk_size = ((inputs.len() + workers - 1) / workers).max(1);
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(|| chunk.iter().map(|s| f(s)).collect::<Vec<_>>()))
            .collect();
        handles.into_iter().flat_map(|h| h.join().expect("worker thread panicked")).collect()
    })
}

/// Builds IPv4 host/subnet/wildcard configs from text, singly or in bulk, plus
/// random generation by IANA type tag.
#[derive(Default)]
pub struct IPv4Factory;

impl IPv4Factory {
    /// Parses a single host interface string (e.g. `"192.168.1.10/24"`).
    pub fn host(&self, input: &str) -> Result<IPv4HostConfig> {
        let (addr, mask) = standardize::ipv4_interface(input)?;
        Ok(IPv4HostConfig::new(addr, mask))
    }

    /// Parses a single subnet interface string.
    pub fn subnet(&self, input: &str) -> Result<IPv4SubnetConfig> {
        let (addr, mask) = standardize::ipv4_interface(input)?;
        Ok(IPv4SubnetConfig::new(addr, mask))
    }

    /// Parses a single wildcard-mask interface string.
    pub fn wildcard(&self, input: &str) -> Result<IPv4WildcardConfig> {
        let (addr, mask) = standardize::ipv4_wildcard(input)?;
        Ok(IPv4WildcardConfig::new(addr, mask))
    }

    /// Parses many host interface strings in parallel, per `dedup`.
    pub fn batch_hosts(&self, inputs: &[&str], dedup: Dedup, max_workers: usize) -> Vec<Result<IPv4HostConfig>> {
        let inputs = prepare_inputs(inputs, dedup);
        run_batch(&inputs, max_workers, |s| self.host(s))
    }

    /// Parses many subnet interface strings in parallel, per `dedup`.
    pub fn batch_subnets(&self, inputs: &[&str], dedup: Dedup, max_workers: usize) -> Vec<Result<IPv4SubnetConfig>> {
        let inputs = prepare_inputs(inputs, dedup);
        run_batch(&inputs, max_workers, |s| self.subnet(s))
    }

    /// Picks a random subnet drawn from `addr_type`'s CIDR blocks (the full
    /// address space if `None`), then a random host inside it. `Public` is
    /// rejection-sampled: regenerate until the classifier agrees.
    pub fn random_host(&self, addr_type: Option<IPv4AddrType>) -> Result<IPv4HostConfig> {
        loop {
            let base = self.random_base_subnet(addr_type)?;
            let (addr, mask) = randomize_v4(&base, 32);
            let host = IPv4HostConfig::new(addr, mask);
            if addr_type == Some(IPv4AddrType::Public) && classify_host::classify_ipv4(&host.addr()) != IPv4AddrType::Public
            {
                continue;
            }
            return Ok(host);
        }
    }

    /// As [`Self::random_host`], but returns the containing subnet config.
    pub fn random_subnet(&self, addr_type: Option<IPv4AddrType>) -> Result<IPv4SubnetConfig> {
        loop {
            let base = self.random_base_subnet(addr_type)?;
            let (addr, mask) = randomize_v4(&base, 32);
            let subnet = IPv4SubnetConfig::new(addr, mask);
            if addr_type == Some(IPv4AddrType::Public)
                && classify_host::classify_ipv4(&subnet.network_id()) != IPv4AddrType::Public
            {
                continue;
            }
            return Ok(subnet);
        }
    }

    /// Generates `count` random hosts, dropping any that fail to generate.
    pub fn random_hosts_batch(&self, addr_type: Option<IPv4AddrType>, count: usize) -> Vec<IPv4HostConfig> {
        (0..count).filter_map(|_| self.random_host(addr_type).ok()).collect()
    }

    /// Generates `count` random subnets, dropping any that fail to generate.
    pub fn random_subnets_batch(&self, addr_type: Option<IPv4AddrType>, count: usize) -> Vec<IPv4SubnetConfig> {
        (0..count).filter_map(|_| self.random_subnet(addr_type).ok()).collect()
    }

    fn random_base_subnet(&self, addr_type: Option<IPv4AddrType>) -> Result<IPv4SubnetConfig> {
        let blocks = match addr_type {
            Some(t) => classify_host::blocks_for_ipv4(t),
            None => &["0.0.0.0/0"],
        };
        let results = self.batch_subnets(blocks, Dedup::Keep, DEFAULT_WORKERS);
        let subnets: Vec<IPv4SubnetConfig> = results.into_iter().collect::<Result<Vec<_>>>()?;
        let idx = rand::thread_rng().gen_range(0..subnets.len());
        Ok(subnets[idx])
    }
}

/// Chooses a random prefix length in `[base.mask(), longest]`, then fills the
/// remaining host bits with random bits, matching the original randomizer's
/// "widen the mask, then randomize what's now free" approach.
fn randomize_v4(base: &IPv4SubnetConfig, longest: u8) -> (IPv4Addr, IPv4NetMask) {
    let original = base.mask().mask_size();
    let random_prefix = if original >= longest { original } else { rand::thread_rng().gen_range(original..=longest) };
    let mask = IPv4NetMask::from_prefix_len(random_prefix).expect("prefix is within 0..=32");
    let host_bits = longest - original;
    let span: u64 = if host_bits == 0 { 1 } else { 1u64 << host_bits };
    let random_bits: u64 = if span <= 1 { 0 } else { rand::thread_rng().gen_range(0..span) };
    let value = (base.network_id().as_decimal() as u64) | random_bits;
    (IPv4Addr::from_decimal(value as u32), mask)
}

/// IPv6 analog of [`IPv4Factory`].
#[derive(Default)]
pub struct IPv6Factory;

impl IPv6Factory {
    /// Parses a single host interface string (e.g. `"2001:db8::1/64"`).
    pub fn host(&self, input: &str) -> Result<IPv6HostConfig> {
        let (addr, mask) = standardize::ipv6_interface(input)?;
        Ok(IPv6HostConfig::new(addr, mask))
    }

    /// Parses a single subnet interface string.
    pub fn subnet(&self, input: &str) -> Result<IPv6SubnetConfig> {
        let (addr, mask) = standardize::ipv6_interface(input)?;
        Ok(IPv6SubnetConfig::new(addr, mask))
    }

    /// Parses a single wildcard-mask interface string.
    pub fn wildcard(&self, input: &str) -> Result<IPv6WildcardConfig> {
        let (addr, mask) = standardize::ipv6_wildcard(input)?;
        Ok(IPv6WildcardConfig::new(addr, mask))
    }

    /// Parses many host interface strings in parallel, per `dedup`.
    pub fn batch_hosts(&self, inputs: &[&str], dedup: Dedup, max_workers: usize) -> Vec<Result<IPv6HostConfig>> {
        let inputs = prepare_inputs(inputs, dedup);
        run_batch(&inputs, max_workers, |s| self.host(s))
    }

    /// Parses many subnet interface strings in parallel, per `dedup`.
    pub fn batch_subnets(&self, inputs: &[&str], dedup: Dedup, max_workers: usize) -> Vec<Result<IPv6SubnetConfig>> {
        let inputs = prepare_inputs(inputs, dedup);
        run_batch(&inputs, max_workers, |s| self.subnet(s))
    }

    /// Picks a random subnet drawn from `addr_type`'s CIDR blocks (the full
    /// address space if `None`), then a random host inside it.
    pub fn random_host(&self, addr_type: Option<IPv6AddrType>) -> Result<IPv6HostConfig> {
        let base = self.random_base_subnet(addr_type)?;
        let (addr, mask) = randomize_v6(&base, 128);
        Ok(IPv6HostConfig::new(addr, mask))
    }

    /// As [`Self::random_host`], but returns the containing subnet config.
    pub fn random_subnet(&self, addr_type: Option<IPv6AddrType>) -> Result<IPv6SubnetConfig> {
        let base = self.random_base_subnet(addr_type)?;
        let (addr, mask) = randomize_v6(&base, 128);
        Ok(IPv6SubnetConfig::new(addr, mask))
    }

    /// Generates `count` random hosts, dropping any that fail to generate.
    pub fn random_hosts_batch(&self, addr_type: Option<IPv6AddrType>, count: usize) -> Vec<IPv6HostConfig> {
        (0..count).filter_map(|_| self.random_host(addr_type).ok()).collect()
    }

    /// Generates `count` random subnets, dropping any that fail to generate.
    pub fn random_subnets_batch(&self, addr_type: Option<IPv6AddrType>, count: usize) -> Vec<IPv6SubnetConfig> {
        (0..count).filter_map(|_| self.random_subnet(addr_type).ok()).collect()
    }

    fn random_base_subnet(&self, addr_type: Option<IPv6AddrType>) -> Result<IPv6SubnetConfig> {
        let blocks = match addr_type {
            Some(t) => classify_host::blocks_for_ipv6(t),
            None => &["::/0"],
        };
        let results = self.batch_subnets(blocks, Dedup::Keep, DEFAULT_WORKERS);
        let subnets: Vec<IPv6SubnetConfig> = results.into_iter().collect::<Result<Vec<_>>>()?;
        let idx = rand::thread_rng().gen_range(0..subnets.len());
        Ok(subnets[idx])
    }
}

fn randomize_v6(base: &IPv6SubnetConfig, longest: u8) -> (IPv6Addr, IPv6NetMask) {
    let original = base.mask().mask_size();
    let random_prefix = if original >= longest { original } else { rand::thread_rng().gen_range(original..=longest) };
    let mask = IPv6NetMask::from_prefix_len(random_prefix).expect("prefix is within 0..=128");
    let host_bits = (longest - original) as u32;
    let span: u128 = if host_bits == 0 { 1 } else { 1u128 << host_bits };
    let random_bits: u128 = if span <= 1 { 0 } else { rand::thread_rng().gen_range(0..span) };
    let value = base.network_id().as_decimal() | random_bits;
    (IPv6Addr::from_decimal(value), mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_host_and_subnet_from_text() {
        let factory = IPv4Factory;
        let host = factory.host("192.168.1.10/24").unwrap();
        assert_eq!(host.network_id().to_string(), "192.168.1.0");
        let subnet = factory.subnet("192.168.1.10/24").unwrap();
        assert_eq!(subnet.network_id().to_string(), "192.168.1.0");
    }

    #[test]
    fn batch_dedup_is_deterministic() {
        let factory = IPv4Factory;
        let results = factory.batch_hosts(
            &["192.168.1.1/24", "10.0.0.1/8", "192.168.1.1/24"],
            Dedup::Drop,
            4,
        );
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn random_host_respects_private_block() {
        let factory = IPv4Factory;
        let host = factory.random_host(Some(IPv4AddrType::Private)).unwrap();
        assert_eq!(classify_host::classify_ipv4(&host.addr()), IPv4AddrType::Private);
    }

    #[test]
    fn random_host_public_passes_classifier() {
        let factory = IPv4Factory;
        let host = factory.random_host(Some(IPv4AddrType::Public)).unwrap();
        assert_eq!(classify_host::classify_ipv4(&host.addr()), IPv4AddrType::Public);
    }

    #[test]
    fn ipv6_random_subnet_within_requested_block() {
        let factory = IPv6Factory;
        let subnet = factory.random_subnet(Some(IPv6AddrType::Documentation)).unwrap();
        assert_eq!(classify_host::classify_ipv6(&subnet.network_id()), IPv6AddrType::Documentation);
    }
}
