//! Netmask and wildcard mask values (C2 continued).
//!
//! A netmask enforces the `1*0*` contiguity invariant and exposes `mask_size` as
//! the count of leading ones. A wildcard mask has no contiguity requirement;
//! `mask_size` is its popcount (the number of "don't care" bits), matching the
//! inverted-netmask convention Cisco ACLs use.

use std::fmt;

use crate::binary::{bit_iter, popcount};
use crate::error::Result;
use crate::ip::convert;

/// An IPv4 netmask: a contiguous `1*0*` 32-bit pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv4NetMask([u8; 4]);

impl IPv4NetMask {
    /// Parses from dotted-decimal text or `"/N"` CIDR notation.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(IPv4NetMask(convert::parse_ipv4_mask_bytes(input)?))
    }

    /// Constructs from a byte slice, requiring contiguity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv4NetMask(convert::bytes_to_ipv4_mask_array(bytes)?))
    }

    /// Builds a mask directly from a CIDR prefix length, `0..=32`.
    pub fn from_prefix_len(prefix_len: u8) -> Result<Self> {
        Self::parse(&format!("/{prefix_len}"))
    }

    /// The raw 4-byte buffer.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Number of leading one bits (the CIDR prefix length).
    pub fn mask_size(&self) -> u8 {
        convert::mask_size(&self.0).expect("constructed masks are always contiguous")
    }
}

impl fmt::Display for IPv4NetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl fmt::Debug for IPv4NetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv4NetMask(/{})", self.mask_size())
    }
}

/// An IPv4 wildcard mask: any 32-bit pattern, no contiguity requirement.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv4WildCard([u8; 4]);

impl IPv4WildCard {
    /// Constructs directly from 4 bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        IPv4WildCard(bytes)
    }

    /// Constructs from a byte slice, which must be exactly 4 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv4WildCard(convert::bytes_to_ipv4_array(bytes)?))
    }

    /// The complement of a contiguous netmask (`mask.not()`), the common case.
    pub fn from_netmask(mask: &IPv4NetMask) -> Self {
        let bytes = mask.as_bytes();
        let mut out = [0u8; 4];
        for i in 0..4 {
            out[i] = !bytes[i];
        }
        IPv4WildCard(out)
    }

    /// The raw 4-byte buffer.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Count of "don't care" (set) bits.
    pub fn mask_size(&self) -> u32 {
        popcount(&self.0)
    }
}

impl fmt::Display for IPv4WildCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl fmt::Debug for IPv4WildCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv4WildCard({self})")
    }
}

/// An IPv6 netmask: a contiguous `1*0*` 128-bit pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv6NetMask([u8; 16]);

impl IPv6NetMask {
    /// Parses from address-form text or `"/N"` CIDR notation.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(IPv6NetMask(convert::parse_ipv6_mask_bytes(input)?))
    }

    /// Constructs from a byte slice, requiring contiguity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv6NetMask(convert::bytes_to_ipv6_mask_array(bytes)?))
    }

    /// Builds a mask directly from a CIDR prefix length, `0..=128`.
    pub fn from_prefix_len(prefix_len: u8) -> Result<Self> {
        Self::parse(&format!("/{prefix_len}"))
    }

    /// The raw 16-byte buffer.
    pub fn as_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// Number of leading one bits (the CIDR prefix length).
    pub fn mask_size(&self) -> u8 {
        convert::mask_size(&self.0).expect("constructed masks are always contiguous")
    }
}

impl fmt::Debug for IPv6NetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv6NetMask(/{})", self.mask_size())
    }
}

/// An IPv6 wildcard mask: any 128-bit pattern, no contiguity requirement.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPv6WildCard([u8; 16]);

impl IPv6WildCard {
    /// Constructs directly from 16 bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        IPv6WildCard(bytes)
    }

    /// Constructs from a byte slice, which must be exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv6WildCard(convert::bytes_to_ipv6_array(bytes)?))
    }

    /// The complement of a contiguous netmask.
    pub fn from_netmask(mask: &IPv6NetMask) -> Self {
        let bytes = mask.as_bytes();
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = !bytes[i];
        }
        IPv6WildCard(out)
    }

    /// The raw 16-byte buffer.
    pub fn as_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// Count of "don't care" (set) bits.
    pub fn mask_size(&self) -> u32 {
        popcount(&self.0)
    }
}

impl fmt::Debug for IPv6WildCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv6WildCard({} bits)", self.mask_size())
    }
}

/// Counts leading one bits shared by two same-length buffers (used by subnet
/// merge to find the common supernet prefix).
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> u8 {
    let mut count = 0u8;
    for (bit_a, bit_b) in bit_iter(a).zip(bit_iter(b)) {
        if bit_a != bit_b {
            break;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn netmask_prefix_round_trip() {
        let m = IPv4NetMask::from_prefix_len(24).unwrap();
        assert_eq!(m.to_string(), "255.255.255.0");
        assert_eq!(m.mask_size(), 24);
    }

    #[test]
    fn wildcard_from_netmask_complements() {
        let m = IPv4NetMask::from_prefix_len(24).unwrap();
        let w = IPv4WildCard::from_netmask(&m);
        assert_eq!(w.as_bytes(), [0, 0, 0, 255]);
        assert_eq!(w.mask_size(), 8);
    }

    #[test]
    fn ipv6_netmask_prefix() {
        let m = IPv6NetMask::from_prefix_len(64).unwrap();
        assert_eq!(m.mask_size(), 64);
        assert_eq!(&m.as_bytes()[..8], &[255u8; 8]);
        assert_eq!(&m.as_bytes()[8..], &[0u8; 8]);
    }

    #[test]
    fn common_prefix_len_stops_at_first_difference() {
        assert_eq!(common_prefix_len(&[0b1111_0000], &[0b1111_1000]), 4);
        assert_eq!(common_prefix_len(&[255, 255], &[255, 255]), 16);
    }
}
