//! Canonical IPv4 and IPv6 address values (C2).
//!
//! Both are immutable fixed-width big-endian byte buffers. Equality and hashing
//! are byte-wise; every derived form (decimal, binary string, hex, canonical text)
//! is computed on demand from the buffer.

use std::fmt;
use std::str::FromStr;

use crate::binary::{bit_iter, bytes_to_decimal};
use crate::error::Result;
use crate::ip::convert;

/// A 32-bit IPv4 address, stored as 4 big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IPv4Addr([u8; 4]);

impl IPv4Addr {
    /// Constructs directly from a 4-byte big-endian buffer.
    pub const fn new(bytes: [u8; 4]) -> Self {
        IPv4Addr(bytes)
    }

    /// All-zeros address (`0.0.0.0`).
    pub const UNSPECIFIED: IPv4Addr = IPv4Addr([0, 0, 0, 0]);
    /// All-ones address (`255.255.255.255`).
    pub const BROADCAST: IPv4Addr = IPv4Addr([255, 255, 255, 255]);

    /// Parses from any recognized IPv4 address form: dotted-decimal text or a
    /// 4-byte buffer. See [`crate::ip::convert`].
    pub fn parse(input: &str) -> Result<Self> {
        Ok(IPv4Addr(convert::parse_ipv4_address_bytes(input)?))
    }

    /// Constructs from a byte slice, which must be exactly 4 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv4Addr(convert::bytes_to_ipv4_array(bytes)?))
    }

    /// Constructs from a 32-bit unsigned decimal value.
    pub fn from_decimal(n: u32) -> Self {
        IPv4Addr(n.to_be_bytes())
    }

    /// The raw 4-byte big-endian buffer.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// The address read as an unsigned 32-bit integer.
    pub fn as_decimal(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Lazy MSB-first sequence of the address's 32 bits.
    pub fn binary_digits(&self) -> impl Iterator<Item = u8> + '_ {
        bit_iter(&self.0)
    }

    /// Bitwise AND.
    pub fn bitand(&self, other: &Self) -> Self {
        let mut out = [0u8; 4];
        for i in 0..4 {
            out[i] = self.0[i] & other.0[i];
        }
        IPv4Addr(out)
    }

    /// Bitwise OR.
    pub fn bitor(&self, other: &Self) -> Self {
        let mut out = [0u8; 4];
        for i in 0..4 {
            out[i] = self.0[i] | other.0[i];
        }
        IPv4Addr(out)
    }

    /// Bitwise complement.
    pub fn not(&self) -> Self {
        let mut out = [0u8; 4];
        for i in 0..4 {
            out[i] = !self.0[i];
        }
        IPv4Addr(out)
    }
}

impl FromStr for IPv4Addr {
    type Err = crate::error::NetlinksError;
    fn from_str(s: &str) -> Result<Self> {
        IPv4Addr::parse(s)
    }
}

impl fmt::Display for IPv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl fmt::Debug for IPv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv4Addr({self})")
    }
}

impl Default for IPv4Addr {
    fn default() -> Self {
        IPv4Addr([0; 4])
    }
}

/// A 128-bit IPv6 address, stored as 16 big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IPv6Addr([u8; 16]);

impl IPv6Addr {
    /// Constructs directly from a 16-byte big-endian buffer.
    pub const fn new(bytes: [u8; 16]) -> Self {
        IPv6Addr(bytes)
    }

    /// All-zeros address (`::`).
    pub const UNSPECIFIED: IPv6Addr = IPv6Addr([0; 16]);
    /// Loopback address (`::1`).
    pub const LOOPBACK: IPv6Addr = IPv6Addr([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

    /// Parses from any recognized IPv6 address form: RFC 4291 textual forms
    /// (including `::` compression and embedded dotted-decimal low 32 bits) or a
    /// 16-byte buffer.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(IPv6Addr(convert::parse_ipv6_address_bytes(input)?))
    }

    /// Constructs from a byte slice, which must be exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(IPv6Addr(convert::bytes_to_ipv6_array(bytes)?))
    }

    /// Constructs from a 128-bit unsigned decimal value.
    pub fn from_decimal(n: u128) -> Self {
        IPv6Addr(n.to_be_bytes())
    }

    /// The raw 16-byte big-endian buffer.
    pub fn as_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// The address read as an unsigned 128-bit integer.
    pub fn as_decimal(&self) -> u128 {
        bytes_to_decimal(&self.0)
    }

    /// Lazy MSB-first sequence of the address's 128 bits.
    pub fn binary_digits(&self) -> impl Iterator<Item = u8> + '_ {
        bit_iter(&self.0)
    }

    /// Bitwise AND.
    pub fn bitand(&self, other: &Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = self.0[i] & other.0[i];
        }
        IPv6Addr(out)
    }

    /// Bitwise OR.
    pub fn bitor(&self, other: &Self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = self.0[i] | other.0[i];
        }
        IPv6Addr(out)
    }

    /// Bitwise complement.
    pub fn not(&self) -> Self {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = !self.0[i];
        }
        IPv6Addr(out)
    }

    /// Renders the 8 groups of 16-bit words, not yet compressed.
    fn groups(&self) -> [u16; 8] {
        let mut groups = [0u16; 8];
        for i in 0..8 {
            groups[i] = u16::from_be_bytes([self.0[2 * i], self.0[2 * i + 1]]);
        }
        groups
    }
}

impl FromStr for IPv6Addr {
    type Err = crate::error::NetlinksError;
    fn from_str(s: &str) -> Result<Self> {
        IPv6Addr::parse(s)
    }
}

impl fmt::Display for IPv6Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.groups();

        // Find the longest run of consecutive zero groups (length >= 2) to
        // replace with `::`, preferring the leftmost run on ties, per RFC 5952.
        let mut best_start = None;
        let mut best_len = 0usize;
        let mut run_start = None;
        for (i, &g) in groups.iter().enumerate() {
            if g == 0 {
                if run_start.is_none() {
                    run_start = Some(i);
                }
                let len = i + 1 - run_start.unwrap();
                if len > best_len {
                    best_len = len;
                    best_start = run_start;
                }
            } else {
                run_start = None;
            }
        }
        if best_len < 2 {
            best_start = None;
        }

        match best_start {
            None => {
                let parts: Vec<String> = groups.iter().map(|g| format!("{g:X}")).collect();
                write!(f, "{}", parts.join(":"))
            }
            Some(start) => {
                let end = start + best_len;
                let head: Vec<String> = groups[..start].iter().map(|g| format!("{g:X}")).collect();
                let tail: Vec<String> = groups[end..].iter().map(|g| format!("{g:X}")).collect();
                write!(f, "{}::{}", head.join(":"), tail.join(":"))
            }
        }
    }
}

impl fmt::Debug for IPv6Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv6Addr({self})")
    }
}

impl Default for IPv6Addr {
    fn default() -> Self {
        IPv6Addr::UNSPECIFIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_round_trip() {
        let a = IPv4Addr::parse("192.168.1.1").unwrap();
        assert_eq!(a.to_string(), "192.168.1.1");
        assert_eq!(a.as_decimal(), 0xC0A80101);
    }

    #[test]
    fn ipv4_rejects_bad_octets() {
        assert!(IPv4Addr::parse("256.0.0.1").is_err());
        assert!(IPv4Addr::parse("1.2.3").is_err());
    }

    #[test]
    fn ipv6_compresses_longest_zero_run() {
        let a = IPv6Addr::parse("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap();
        assert_eq!(a.to_string(), "2001:DB8::1");
    }

    #[test]
    fn ipv6_all_zero_is_double_colon() {
        assert_eq!(IPv6Addr::UNSPECIFIED.to_string(), "::");
    }

    #[test]
    fn ipv6_round_trip_through_canonical_text() {
        let a = IPv6Addr::parse("::ffff:192.0.2.1").unwrap();
        let s = a.to_string();
        let b = IPv6Addr::parse(&s).unwrap();
        assert_eq!(a, b);
    }
}
