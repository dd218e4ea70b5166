//! Flexible input standardization (C5): accepts interface/wildcard pairs in
//! any of a handful of common shapes and normalizes them into the concrete
//! address/mask types the rest of the crate works with. Candidate shapes are
//! tried in order, narrowest/least-ambiguous first, mirroring the original
//! standardizer chain.

use crate::error::{NetlinksError, Result};
use crate::ip::addr::{IPv4Addr, IPv6Addr};
use crate::ip::convert;
use crate::ip::mask::{IPv4NetMask, IPv4WildCard, IPv6NetMask, IPv6WildCard};
use crate::ip::recognize::{looks_like_ipv4_text, looks_like_ipv6_text};

/// Standardizes an IPv4 interface given as `"a.b.c.d/n"` or `"a.b.c.d w.x.y.z"`.
pub fn ipv4_interface(input: &str) -> Result<(IPv4Addr, IPv4NetMask)> {
    let input = input.trim();
    if let Some((host, suffix)) = input.split_once('/') {
        if looks_like_ipv4_text(host) {
            let addr = IPv4Addr::parse(host)?;
            let mask = IPv4NetMask::parse(&format!("/{suffix}"))?;
            return Ok((addr, mask));
        }
    }
    if let Some((host, mask_part)) = split_on_whitespace(input) {
        if looks_like_ipv4_text(host) && looks_like_ipv4_text(mask_part) {
            let addr = IPv4Addr::parse(host)?;
            let mask = IPv4NetMask::parse(mask_part)?;
            return Ok((addr, mask));
        }
    }
    Err(NetlinksError::invalid_address(input, "not a recognized IPv4 interface form"))
}

/// Standardizes an IPv4 address/wildcard pair given as `"a.b.c.d w.x.y.z"`.
pub fn ipv4_wildcard(input: &str) -> Result<(IPv4Addr, IPv4WildCard)> {
    let input = input.trim();
    if let Some((host, wildcard_part)) = split_on_whitespace(input) {
        if looks_like_ipv4_text(host) && looks_like_ipv4_text(wildcard_part) {
            let addr = IPv4Addr::parse(host)?;
            let wildcard = IPv4WildCard::from_bytes(&convert::parse_ipv4_address_bytes(wildcard_part)?)?;
            return Ok((addr, wildcard));
        }
    }
    Err(NetlinksError::invalid_address(input, "not a recognized IPv4 wildcard form"))
}

/// Standardizes an IPv6 interface given as `"addr/n"` or `"addr addr"`.
pub fn ipv6_interface(input: &str) -> Result<(IPv6Addr, IPv6NetMask)> {
    let input = input.trim();
    if let Some((host, suffix)) = input.split_once('/') {
        if looks_like_ipv6_text(host) {
            let addr = IPv6Addr::parse(host)?;
            let mask = IPv6NetMask::parse(&format!("/{suffix}"))?;
            return Ok((addr, mask));
        }
    }
    if let Some((host, mask_part)) = split_on_whitespace(input) {
        if looks_like_ipv6_text(host) && looks_like_ipv6_text(mask_part) {
            let addr = IPv6Addr::parse(host)?;
            let mask = IPv6NetMask::parse(mask_part)?;
            return Ok((addr, mask));
        }
    }
    Err(NetlinksError::invalid_address(input, "not a recognized IPv6 interface form"))
}

/// Standardizes an IPv6 address/wildcard pair given as `"addr addr"`.
pub fn ipv6_wildcard(input: &str) -> Result<(IPv6Addr, IPv6WildCard)> {
    let input = input.trim();
    if let Some((host, wildcard_part)) = split_on_whitespace(input) {
        if looks_like_ipv6_text(host) && looks_like_ipv6_text(wildcard_part) {
            let addr = IPv6Addr::parse(host)?;
            let wildcard = IPv6WildCard::from_bytes(&convert::parse_ipv6_address_bytes(wildcard_part)?)?;
            return Ok((addr, wildcard));
        }
    }
    Err(NetlinksError::invalid_address(input, "not a recognized IPv6 wildcard form"))
}

fn split_on_whitespace(input: &str) -> Option<(&str, &str)> {
    let mut parts = input.split_whitespace();
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_interface_accepts_cidr_and_dotted_mask() {
        let (addr, mask) = ipv4_interface("192.168.1.1/24").unwrap();
        assert_eq!(addr.to_string(), "192.168.1.1");
        assert_eq!(mask.mask_size(), 24);

        let (addr, mask) = ipv4_interface("192.168.1.1 255.255.255.0").unwrap();
        assert_eq!(addr.to_string(), "192.168.1.1");
        assert_eq!(mask.mask_size(), 24);
    }

    #[test]
    fn ipv4_wildcard_accepts_dotted_pair() {
        let (addr, wildcard) = ipv4_wildcard("192.168.1.1 0.0.0.255").unwrap();
        assert_eq!(addr.to_string(), "192.168.1.1");
        assert_eq!(wildcard.mask_size(), 8);
    }

    #[test]
    fn ipv6_interface_accepts_cidr() {
        let (addr, mask) = ipv6_interface("2001:db8::1/64").unwrap();
        assert_eq!(addr.to_string(), "2001:DB8::1");
        assert_eq!(mask.mask_size(), 64);
    }

    #[test]
    fn rejects_garbage() {
        assert!(ipv4_interface("not an address").is_err());
    }
}
