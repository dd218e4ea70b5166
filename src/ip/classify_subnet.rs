//! IANA special-purpose classification for subnets (C7).
//!
//! Unlike host classification, subnet classification evaluates every rule (a
//! subnet can straddle more than one special-purpose block) and uses
//! range-overlap rather than containment: a subnet matches a block if its
//! range intersects the block's range at all, not only if it sits fully
//! inside it. The `PUBLIC` rule is the exception — see [`ipv4_public_rule`].

use crate::ip::addr::{IPv4Addr, IPv6Addr};
use crate::ip::classify_host::{IPv4AddrType, IPv6AddrType};
use crate::ip::config::{IPv4SubnetConfig, IPv6SubnetConfig};
use crate::ip::mask::IPv4NetMask;

/// Classifies an IPv4 subnet against every special-purpose block it overlaps.
pub fn classify_ipv4_subnet(subnet: &IPv4SubnetConfig) -> Vec<IPv4AddrType> {
    let mut types = Vec::new();
    let range = decimal_range_v4(subnet);

    if overlaps_any_v4("0.0.0.0/32", range) {
        types.push(IPv4AddrType::Unspecified);
    }
    if overlaps_any_v4("255.255.255.255/32", range) {
        types.push(IPv4AddrType::LimitedBroadcast);
    }
    if overlaps_any_v4("0.0.0.0/8", range) {
        types.push(IPv4AddrType::CurrentNetwork);
    }
    for cidr in ["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"] {
        if overlaps_any_v4(cidr, range) {
            types.push(IPv4AddrType::Private);
            break;
        }
    }
    if ipv4_public_rule(range) {
        types.push(IPv4AddrType::Public);
    }
    for cidr in ["192.0.2.0/24", "198.51.100.0/24", "203.0.113.0/24", "233.252.0.0/24"] {
        if overlaps_any_v4(cidr, range) {
            types.push(IPv4AddrType::Documentation);
            break;
        }
    }
    if overlaps_any_v4("224.0.0.0/4", range) {
        types.push(IPv4AddrType::Multicast);
    }
    if overlaps_any_v4("169.254.0.0/16", range) {
        types.push(IPv4AddrType::LinkLocal);
    }
    if overlaps_any_v4("127.0.0.0/8", range) {
        types.push(IPv4AddrType::Loopback);
    }
    if overlaps_any_v4("192.0.0.0/24", range) {
        types.push(IPv4AddrType::DsLite);
    }
    if overlaps_any_v4("100.64.0.0/10", range) {
        types.push(IPv4AddrType::CarrierGradeNat);
    }
    if overlaps_any_v4("198.18.0.0/15", range) {
        types.push(IPv4AddrType::BenchmarkTesting);
    }
    if overlaps_any_v4("192.88.99.0/24", range) {
        types.push(IPv4AddrType::Ipv6ToIpv4Relay);
    }
    if overlaps_any_v4("240.0.0.0/4", range) {
        types.push(IPv4AddrType::Reserved);
    }
    types
}

const V4_PUBLIC_EXCLUSIONS: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "192.88.99.0/24",
    "192.168.0.0/16",
    "198.18.0.0/15",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "233.252.0.0/24",
    "240.0.0.0/4",
    "255.255.255.255/32",
];

/// A subnet is `PUBLIC` if it is not wholly contained in any single reserved
/// block, and its range extends past at least one reserved block's boundary.
/// A subnet fully straddling two reserved blocks without escaping either is
/// still not public under this rule — it is "fully accounted for" by the
/// reserved space it touches.
fn ipv4_public_rule((start, end): (u32, u32)) -> bool {
    for cidr in V4_PUBLIC_EXCLUSIONS {
        let (r_start, r_end) = cidr_range_v4(cidr);
        if r_start <= start && end <= r_end {
            return false;
        }
    }
    for cidr in V4_PUBLIC_EXCLUSIONS {
        let (r_start, r_end) = cidr_range_v4(cidr);
        if start < r_start || end > r_end {
            return true;
        }
    }
    false
}

fn decimal_range_v4(subnet: &IPv4SubnetConfig) -> (u32, u32) {
    let [net, bcast] = subnet.subnet_range();
    (net.as_decimal(), bcast.as_decimal())
}

fn cidr_range_v4(cidr: &str) -> (u32, u32) {
    let (net, prefix) = cidr.split_once('/').expect("static table entries are well-formed");
    let addr = IPv4Addr::parse(net).expect("static table entries are well-formed");
    let mask = IPv4NetMask::from_prefix_len(prefix.parse().unwrap()).expect("static table entries are well-formed");
    let cfg = IPv4SubnetConfig::new(addr, mask);
    (cfg.network_id().as_decimal(), cfg.broadcast_ip().as_decimal())
}

fn overlaps_any_v4(cidr: &str, (start, end): (u32, u32)) -> bool {
    let (r_start, r_end) = cidr_range_v4(cidr);
    !(end < r_start || r_end < start)
}

/// Classifies an IPv6 subnet against every special-purpose block it overlaps.
pub fn classify_ipv6_subnet(subnet: &IPv6SubnetConfig) -> Vec<IPv6AddrType> {
    let mut types = Vec::new();
    let range = decimal_range_v6(subnet);

    if overlaps_any_v6("::/128", range) {
        types.push(IPv6AddrType::Unspecified);
    }
    if overlaps_any_v6("::1/128", range) {
        types.push(IPv6AddrType::Loopback);
    }
    if overlaps_any_v6("::ffff:0:0/96", range) {
        types.push(IPv6AddrType::Ipv4Mapped);
    }
    if overlaps_any_v6("::ffff:0:0:0/96", range) {
        types.push(IPv6AddrType::Ipv4Translated);
    }
    for cidr in ["64:ff9b::/96", "64:ff9b:1::/48"] {
        if overlaps_any_v6(cidr, range) {
            types.push(IPv6AddrType::Ipv4Ipv6Translation);
            break;
        }
    }
    if overlaps_any_v6("100::/64", range) {
        types.push(IPv6AddrType::DiscardPrefix);
    }
    if overlaps_any_v6("2001::/32", range) {
        types.push(IPv6AddrType::TeredoTunneling);
    }
    for cidr in ["2001:db8::/32", "3fff::/20"] {
        if overlaps_any_v6(cidr, range) {
            types.push(IPv6AddrType::Documentation);
            break;
        }
    }
    if overlaps_any_v6("2001:20::/28", range) {
        types.push(IPv6AddrType::Orchidv2);
    }
    if overlaps_any_v6("2002::/16", range) {
        types.push(IPv6AddrType::Ip6To4);
    }
    if overlaps_any_v6("5f00::/16", range) {
        types.push(IPv6AddrType::Srv6);
    }
    if overlaps_any_v6("fe80::/64", range) {
        types.push(IPv6AddrType::LinkLocal);
    }
    if overlaps_any_v6("ff00::/8", range) {
        types.push(IPv6AddrType::Multicast);
    }
    if overlaps_any_v6("fc00::/7", range) {
        types.push(IPv6AddrType::UniqueLocal);
    }
    if overlaps_any_v6("2000::/3", range) {
        types.push(IPv6AddrType::GlobalUnicast);
    }
    types
}

fn decimal_range_v6(subnet: &IPv6SubnetConfig) -> (u128, u128) {
    let [net, last] = subnet.subnet_range();
    (net.as_decimal(), last.as_decimal())
}

fn cidr_range_v6(cidr: &str) -> (u128, u128) {
    let (net, prefix) = cidr.split_once('/').expect("static table entries are well-formed");
    let addr = IPv6Addr::parse(net).expect("static table entries are well-formed");
    let mask = crate::ip::mask::IPv6NetMask::from_prefix_len(prefix.parse().unwrap())
        .expect("static table entries are well-formed");
    let cfg = IPv6SubnetConfig::new(addr, mask);
    let [net_id, last] = cfg.subnet_range();
    (net_id.as_decimal(), last.as_decimal())
}

fn overlaps_any_v6(cidr: &str, (start, end): (u128, u128)) -> bool {
    let (r_start, r_end) = cidr_range_v6(cidr);
    !(end < r_start || r_end < start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::mask::IPv4NetMask;

    #[test]
    fn private_slash_24_overlaps_private_block() {
        let subnet = IPv4SubnetConfig::new(IPv4Addr::parse("10.1.2.0").unwrap(), IPv4NetMask::from_prefix_len(24).unwrap());
        let types = classify_ipv4_subnet(&subnet);
        assert!(types.contains(&IPv4AddrType::Private));
        assert!(!types.contains(&IPv4AddrType::Public));
    }

    #[test]
    fn public_slash_24_is_public_only() {
        let subnet = IPv4SubnetConfig::new(IPv4Addr::parse("8.8.8.0").unwrap(), IPv4NetMask::from_prefix_len(24).unwrap());
        let types = classify_ipv4_subnet(&subnet);
        assert_eq!(types, vec![IPv4AddrType::Public]);
    }

    #[test]
    fn subnet_straddling_reserved_and_public_is_public() {
        // 99.255.255.0/24 sits just below 100.64.0.0/10 (CGN); its own /24
        // doesn't touch CGN at all, so it should classify as plain public.
        let subnet = IPv4SubnetConfig::new(IPv4Addr::parse("99.255.255.0").unwrap(), IPv4NetMask::from_prefix_len(24).unwrap());
        let types = classify_ipv4_subnet(&subnet);
        assert_eq!(types, vec![IPv4AddrType::Public]);
    }
}
