//! IANA special-purpose classification for single addresses (C6).
//!
//! Each family is classified by an ordered table of (block list, type) rules,
//! evaluated top to bottom with the first match winning. This mirrors the
//! handler-chain order from the original classifier, flattened into a plain
//! loop: order matters because later rules (documentation, multicast, ...) sit
//! inside the `PUBLIC` exclusion list and must never be reached once `PUBLIC`
//! has already matched on a narrower, earlier rule.

use std::fmt;

use crate::ip::addr::{IPv4Addr, IPv6Addr};
use crate::ip::mask::{IPv4NetMask, IPv6NetMask};

/// IANA special-purpose classification of a single IPv4 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IPv4AddrType {
    /// Matched no known block; should not occur for a well-formed address.
    UndefinedType,
    /// `0.0.0.0`.
    Unspecified,
    /// `255.255.255.255`.
    LimitedBroadcast,
    /// `0.0.0.0/8`, "this network".
    CurrentNetwork,
    /// RFC 1918 private space.
    Private,
    /// Globally routable, outside every other special-purpose block.
    Public,
    /// TEST-NET-1/2/3 and the MCAST-TEST-NET documentation ranges.
    Documentation,
    /// `224.0.0.0/4`.
    Multicast,
    /// `169.254.0.0/16`.
    LinkLocal,
    /// `127.0.0.0/8`.
    Loopback,
    /// `192.0.0.0/24`, DS-Lite.
    DsLite,
    /// `100.64.0.0/10`, carrier-grade NAT (RFC 6598).
    CarrierGradeNat,
    /// `198.18.0.0/15`, network interconnect device benchmark testing.
    BenchmarkTesting,
    /// `192.88.99.0/24`, 6to4 relay anycast.
    Ipv6ToIpv4Relay,
    /// `240.0.0.0/4`, reserved for future use.
    Reserved,
}

impl fmt::Display for IPv4AddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IPv4AddrType::UndefinedType => "UNDEFINED_TYPE",
            IPv4AddrType::Unspecified => "UNSPECIFIED",
            IPv4AddrType::LimitedBroadcast => "LIMITED_BROADCAST",
            IPv4AddrType::CurrentNetwork => "CURRENT_NETWORK",
            IPv4AddrType::Private => "PRIVATE",
            IPv4AddrType::Public => "PUBLIC",
            IPv4AddrType::Documentation => "DOCUMENTATION",
            IPv4AddrType::Multicast => "MULTICAST",
            IPv4AddrType::LinkLocal => "LINK_LOCAL",
            IPv4AddrType::Loopback => "LOOPBACK",
            IPv4AddrType::DsLite => "DS_LITE",
            IPv4AddrType::CarrierGradeNat => "CARRIER_GRADE_NAT",
            IPv4AddrType::BenchmarkTesting => "BENCHMARK_TESTING",
            IPv4AddrType::Ipv6ToIpv4Relay => "IPV6_TO_IPV4_RELAY",
            IPv4AddrType::Reserved => "RESERVED",
        };
        f.write_str(name)
    }
}

/// IANA special-purpose classification of a single IPv6 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IPv6AddrType {
    /// Matched no known block; should not occur for a well-formed address.
    UndefinedType,
    /// `::`.
    Unspecified,
    /// `::1`.
    Loopback,
    /// `::ffff:0:0/96`, an embedded IPv4 address.
    Ipv4Mapped,
    /// `::ffff:0:0:0/96`, IPv4-translated (RFC 8215).
    Ipv4Translated,
    /// `64:ff9b::/96` or `64:ff9b:1::/48`, NAT64 translation.
    Ipv4Ipv6Translation,
    /// `100::/64`, discard-only address block.
    DiscardPrefix,
    /// `2001::/32`, Teredo tunneling.
    TeredoTunneling,
    /// `2001:db8::/32` or `3fff::/20`.
    Documentation,
    /// `2001:20::/28`, ORCHIDv2.
    Orchidv2,
    /// `2002::/16`, 6to4.
    Ip6To4,
    /// `5f00::/16`, SRv6 SID space.
    Srv6,
    /// `fe80::/64`.
    LinkLocal,
    /// `ff00::/8`.
    Multicast,
    /// `fc00::/7`, unique local address space.
    UniqueLocal,
    /// `2000::/3`, globally routable.
    GlobalUnicast,
}

impl fmt::Display for IPv6AddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IPv6AddrType::UndefinedType => "UNDEFINED_TYPE",
            IPv6AddrType::Unspecified => "UNSPECIFIED",
            IPv6AddrType::Loopback => "LOOPBACK",
            IPv6AddrType::Ipv4Mapped => "IPV4_MAPPED",
            IPv6AddrType::Ipv4Translated => "IPV4_TRANSLATED",
            IPv6AddrType::Ipv4Ipv6Translation => "IPV4_IPV6_TRANSLATION",
            IPv6AddrType::DiscardPrefix => "DISCARD_PREFIX",
            IPv6AddrType::TeredoTunneling => "TEREDO_TUNNELING",
            IPv6AddrType::Documentation => "DOCUMENTATION",
            IPv6AddrType::Orchidv2 => "ORCHIDV2",
            IPv6AddrType::Ip6To4 => "IP6_TO_4",
            IPv6AddrType::Srv6 => "SRV6",
            IPv6AddrType::LinkLocal => "LINK_LOCAL",
            IPv6AddrType::Multicast => "MULTICAST",
            IPv6AddrType::UniqueLocal => "UNIQUE_LOCAL",
            IPv6AddrType::GlobalUnicast => "GLOBAL_UNICAST",
        };
        f.write_str(name)
    }
}

const V4_CURRENT_NETWORK: &[&str] = &["0.0.0.0/8"];
const V4_PRIVATE: &[&str] = &["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"];
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
const V4_DOCUMENTATION: &[&str] = &[
    "192.0.2.0/24",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "233.252.0.0/24",
];
const V4_MULTICAST: &[&str] = &["224.0.0.0/4"];
const V4_LINK_LOCAL: &[&str] = &["169.254.0.0/16"];
const V4_LOOPBACK: &[&str] = &["127.0.0.0/8"];
const V4_DS_LITE: &[&str] = &["192.0.0.0/24"];
const V4_CARRIER_GRADE_NAT: &[&str] = &["100.64.0.0/10"];
const V4_BENCHMARK_TESTING: &[&str] = &["198.18.0.0/15"];
const V4_IPV6_TO_IPV4_RELAY: &[&str] = &["192.88.99.0/24"];
const V4_RESERVED: &[&str] = &["240.0.0.0/4"];

/// Classifies an IPv4 address into its IANA special-purpose type. Unspecified
/// and limited-broadcast are checked directly on the bit pattern rather than
/// via a block list, matching the single-host `/32` edge cases.
pub fn classify_ipv4(addr: &IPv4Addr) -> IPv4AddrType {
    if addr.binary_digits().all(|b| b == 0) {
        return IPv4AddrType::Unspecified;
    }
    if addr.binary_digits().all(|b| b == 1) {
        return IPv4AddrType::LimitedBroadcast;
    }
    if in_any_v4(addr, V4_CURRENT_NETWORK) {
        return IPv4AddrType::CurrentNetwork;
    }
    if in_any_v4(addr, V4_PRIVATE) {
        return IPv4AddrType::Private;
    }
    if !in_any_v4(addr, V4_PUBLIC_EXCLUSIONS) {
        return IPv4AddrType::Public;
    }
    if in_any_v4(addr, V4_DOCUMENTATION) {
        return IPv4AddrType::Documentation;
    }
    if in_any_v4(addr, V4_MULTICAST) {
        return IPv4AddrType::Multicast;
    }
    if in_any_v4(addr, V4_LINK_LOCAL) {
        return IPv4AddrType::LinkLocal;
    }
    if in_any_v4(addr, V4_LOOPBACK) {
        return IPv4AddrType::Loopback;
    }
    if in_any_v4(addr, V4_DS_LITE) {
        return IPv4AddrType::DsLite;
    }
    if in_any_v4(addr, V4_CARRIER_GRADE_NAT) {
        return IPv4AddrType::CarrierGradeNat;
    }
    if in_any_v4(addr, V4_BENCHMARK_TESTING) {
        return IPv4AddrType::BenchmarkTesting;
    }
    if in_any_v4(addr, V4_IPV6_TO_IPV4_RELAY) {
        return IPv4AddrType::Ipv6ToIpv4Relay;
    }
    if in_any_v4(addr, V4_RESERVED) {
        return IPv4AddrType::Reserved;
    }
    IPv4AddrType::UndefinedType
}

const V6_UNSPECIFIED: &str = "::/128";
const V6_LOOPBACK: &str = "::1/128";
const V6_IPV4_MAPPED: &str = "::ffff:0:0/96";
const V6_IPV4_TRANSLATED: &str = "::ffff:0:0:0/96";
const V6_IPV4_IPV6_TRANSLATION: &[&str] = &["64:ff9b::/96", "64:ff9b:1::/48"];
const V6_DISCARD_PREFIX: &str = "100::/64";
const V6_TEREDO_TUNNELING: &str = "2001::/32";
const V6_DOCUMENTATION: &[&str] = &["2001:db8::/32", "3fff::/20"];
const V6_ORCHIDV2: &str = "2001:20::/28";
const V6_IP6_TO4: &str = "2002::/16";
const V6_SRV6: &str = "5f00::/16";
const V6_LINK_LOCAL: &str = "fe80::/64";
const V6_MULTICAST: &str = "ff00::/8";
const V6_UNIQUE_LOCAL: &str = "fc00::/7";
const V6_GLOBAL_UNICAST: &str = "2000::/3";

/// Classifies an IPv6 address into its IANA special-purpose type, checked in
/// the narrowest-first order the original handler chain used.
pub fn classify_ipv6(addr: &IPv6Addr) -> IPv6AddrType {
    if in_v6(addr, V6_UNSPECIFIED) {
        return IPv6AddrType::Unspecified;
    }
    if in_v6(addr, V6_LOOPBACK) {
        return IPv6AddrType::Loopback;
    }
    if in_v6(addr, V6_IPV4_MAPPED) {
        return IPv6AddrType::Ipv4Mapped;
    }
    if in_v6(addr, V6_IPV4_TRANSLATED) {
        return IPv6AddrType::Ipv4Translated;
    }
    if in_any_v6(addr, V6_IPV4_IPV6_TRANSLATION) {
        return IPv6AddrType::Ipv4Ipv6Translation;
    }
    if in_v6(addr, V6_DISCARD_PREFIX) {
        return IPv6AddrType::DiscardPrefix;
    }
    if in_v6(addr, V6_TEREDO_TUNNELING) {
        return IPv6AddrType::TeredoTunneling;
    }
    if in_any_v6(addr, V6_DOCUMENTATION) {
        return IPv6AddrType::Documentation;
    }
    if in_v6(addr, V6_ORCHIDV2) {
        return IPv6AddrType::Orchidv2;
    }
    if in_v6(addr, V6_IP6_TO4) {
        return IPv6AddrType::Ip6To4;
    }
    if in_v6(addr, V6_SRV6) {
        return IPv6AddrType::Srv6;
    }
    if in_v6(addr, V6_LINK_LOCAL) {
        return IPv6AddrType::LinkLocal;
    }
    if in_v6(addr, V6_MULTICAST) {
        return IPv6AddrType::Multicast;
    }
    if in_v6(addr, V6_UNIQUE_LOCAL) {
        return IPv6AddrType::UniqueLocal;
    }
    if in_v6(addr, V6_GLOBAL_UNICAST) {
        return IPv6AddrType::GlobalUnicast;
    }
    IPv6AddrType::UndefinedType
}

/// The CIDR blocks a given IPv4 type is drawn from, used by the randomizer to
/// pick a candidate subnet before generating a host inside it. `Public` has no
/// block list of its own (it's "whatever isn't any other block"), so callers
/// sample from the full address space and rely on rejection sampling.
pub fn blocks_for_ipv4(addr_type: IPv4AddrType) -> &'static [&'static str] {
    match addr_type {
        IPv4AddrType::Unspecified => &["0.0.0.0/32"],
        IPv4AddrType::LimitedBroadcast => &["255.255.255.255/32"],
        IPv4AddrType::CurrentNetwork => V4_CURRENT_NETWORK,
        IPv4AddrType::Private => V4_PRIVATE,
        IPv4AddrType::Documentation => V4_DOCUMENTATION,
        IPv4AddrType::Multicast => V4_MULTICAST,
        IPv4AddrType::LinkLocal => V4_LINK_LOCAL,
        IPv4AddrType::Loopback => V4_LOOPBACK,
        IPv4AddrType::DsLite => V4_DS_LITE,
        IPv4AddrType::CarrierGradeNat => V4_CARRIER_GRADE_NAT,
        IPv4AddrType::BenchmarkTesting => V4_BENCHMARK_TESTING,
        IPv4AddrType::Ipv6ToIpv4Relay => V4_IPV6_TO_IPV4_RELAY,
        IPv4AddrType::Reserved => V4_RESERVED,
        IPv4AddrType::Public | IPv4AddrType::UndefinedType => &["0.0.0.0/0"],
    }
}

/// IPv6 analog of [`blocks_for_ipv4`].
pub fn blocks_for_ipv6(addr_type: IPv6AddrType) -> &'static [&'static str] {
    match addr_type {
        IPv6AddrType::Unspecified => &[V6_UNSPECIFIED],
        IPv6AddrType::Loopback => &[V6_LOOPBACK],
        IPv6AddrType::Ipv4Mapped => &[V6_IPV4_MAPPED],
        IPv6AddrType::Ipv4Translated => &[V6_IPV4_TRANSLATED],
        IPv6AddrType::Ipv4Ipv6Translation => V6_IPV4_IPV6_TRANSLATION,
        IPv6AddrType::DiscardPrefix => &[V6_DISCARD_PREFIX],
        IPv6AddrType::TeredoTunneling => &[V6_TEREDO_TUNNELING],
        IPv6AddrType::Documentation => V6_DOCUMENTATION,
        IPv6AddrType::Orchidv2 => &[V6_ORCHIDV2],
        IPv6AddrType::Ip6To4 => &[V6_IP6_TO4],
        IPv6AddrType::Srv6 => &[V6_SRV6],
        IPv6AddrType::LinkLocal => &[V6_LINK_LOCAL],
        IPv6AddrType::Multicast => &[V6_MULTICAST],
        IPv6AddrType::UniqueLocal => &[V6_UNIQUE_LOCAL],
        IPv6AddrType::GlobalUnicast => &[V6_GLOBAL_UNICAST],
        IPv6AddrType::UndefinedType => &["::/0"],
    }
}

/// Canonical containment test: `(addr & mask) == network_id`.
fn in_any_v4(addr: &IPv4Addr, blocks: &[&str]) -> bool {
    blocks.iter().any(|b| in_v4(addr, b))
}

fn in_v4(addr: &IPv4Addr, cidr: &str) -> bool {
    let (net, prefix) = cidr.split_once('/').expect("static table entries are well-formed");
    let network = IPv4Addr::parse(net).expect("static table entries are well-formed");
    let mask = IPv4NetMask::from_prefix_len(prefix.parse().unwrap()).expect("static table entries are well-formed");
    addr.bitand(&IPv4Addr::new(mask.as_bytes())) == network
}

fn in_any_v6(addr: &IPv6Addr, blocks: &[&str]) -> bool {
    blocks.iter().any(|b| in_v6(addr, b))
}

fn in_v6(addr: &IPv6Addr, cidr: &str) -> bool {
    let (net, prefix) = cidr.split_once('/').expect("static table entries are well-formed");
    let network = IPv6Addr::parse(net).expect("static table entries are well-formed");
    let mask = IPv6NetMask::from_prefix_len(prefix.parse().unwrap()).expect("static table entries are well-formed");
    addr.bitand(&IPv6Addr::new(mask.as_bytes())) == network
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_ipv4_cases() {
        assert_eq!(classify_ipv4(&IPv4Addr::parse("0.0.0.0").unwrap()), IPv4AddrType::Unspecified);
        assert_eq!(
            classify_ipv4(&IPv4Addr::parse("255.255.255.255").unwrap()),
            IPv4AddrType::LimitedBroadcast
        );
        assert_eq!(classify_ipv4(&IPv4Addr::parse("10.0.0.1").unwrap()), IPv4AddrType::Private);
        assert_eq!(classify_ipv4(&IPv4Addr::parse("8.8.8.8").unwrap()), IPv4AddrType::Public);
        assert_eq!(classify_ipv4(&IPv4Addr::parse("127.0.0.1").unwrap()), IPv4AddrType::Loopback);
        assert_eq!(
            classify_ipv4(&IPv4Addr::parse("192.0.2.1").unwrap()),
            IPv4AddrType::Documentation
        );
    }

    #[test]
    fn classifies_common_ipv6_cases() {
        assert_eq!(classify_ipv6(&IPv6Addr::UNSPECIFIED), IPv6AddrType::Unspecified);
        assert_eq!(classify_ipv6(&IPv6Addr::LOOPBACK), IPv6AddrType::Loopback);
        assert_eq!(
            classify_ipv6(&IPv6Addr::parse("2001:db8::1").unwrap()),
            IPv6AddrType::Documentation
        );
        assert_eq!(
            classify_ipv6(&IPv6Addr::parse("fe80::1").unwrap()),
            IPv6AddrType::LinkLocal
        );
        assert_eq!(
            classify_ipv6(&IPv6Addr::parse("2600::1").unwrap()),
            IPv6AddrType::GlobalUnicast
        );
    }

    #[test]
    fn display_renders_screaming_snake_case() {
        assert_eq!(IPv4AddrType::Private.to_string(), "PRIVATE");
        assert_eq!(IPv6AddrType::GlobalUnicast.to_string(), "GLOBAL_UNICAST");
    }
}
