//! MAC address values and classification (C2/C6 for the MAC family).

use std::fmt;

use crate::error::{NetlinksError, Result};

/// A 48-bit MAC address, stored as 6 big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// Constructs directly from a 6-byte buffer.
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }

    /// All-ones address.
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    /// Parses colon- or hyphen-separated hex text (`"aa:bb:cc:dd:ee:ff"` or
    /// `"aa-bb-cc-dd-ee-ff"`), case-insensitive.
    pub fn parse(input: &str) -> Result<Self> {
        let sep = if input.contains(':') {
            ':'
        } else if input.contains('-') {
            '-'
        } else {
            return Err(NetlinksError::invalid_address(input, "expected ':' or '-' separated hex octets"));
        };
        let parts: Vec<&str> = input.split(sep).collect();
        if parts.len() != 6 {
            return Err(NetlinksError::invalid_address(input, "expected 6 octets"));
        }
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| NetlinksError::invalid_address(input, "octet is not valid hex"))?;
        }
        Ok(MacAddr(bytes))
    }

    /// Constructs from a byte slice, which must be exactly 6 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 6] = bytes
            .try_into()
            .map_err(|_| NetlinksError::invalid_address(format!("{bytes:?}"), "expected exactly 6 bytes"))?;
        Ok(MacAddr(array))
    }

    /// The raw 6-byte big-endian buffer.
    pub fn as_bytes(&self) -> [u8; 6] {
        self.0
    }

    /// The address read as an unsigned 48-bit integer (held in a `u64`).
    pub fn as_decimal(&self) -> u64 {
        let mut padded = [0u8; 8];
        padded[2..].copy_from_slice(&self.0);
        u64::from_be_bytes(padded)
    }

    /// The 3-byte OUI prefix this address was assigned under.
    pub fn oui_prefix(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Classifies the address as broadcast, multicast, or unicast, checked in
    /// that order: broadcast is the more specific case (it happens to also
    /// carry the multicast bit), so it must be ruled in before multicast is
    /// ruled out.
    pub fn classify(&self) -> MacAddrType {
        if self.0 == [0xFF; 6] {
            return MacAddrType::Broadcast;
        }
        if self.0[0] & 0x01 != 0 {
            return MacAddrType::Multicast;
        }
        MacAddrType::Unicast
    }
}

impl Default for MacAddr {
    fn default() -> Self {
        MacAddr([0; 6])
    }
}

impl std::str::FromStr for MacAddr {
    type Err = NetlinksError;
    fn from_str(s: &str) -> Result<Self> {
        MacAddr::parse(s)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddr({self})")
    }
}

/// IEEE 802 address class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MacAddrType {
    /// I/G bit clear and not the all-ones broadcast address.
    Unicast,
    /// I/G bit set.
    Multicast,
    /// `FF:FF:FF:FF:FF:FF`.
    Broadcast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_and_hyphen_forms() {
        let a = MacAddr::parse("08:bf:b8:34:c6:a4").unwrap();
        let b = MacAddr::parse("08-BF-B8-34-C6-A4").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "08:BF:B8:34:C6:A4");
    }

    #[test]
    fn classifies_broadcast_multicast_unicast_in_order() {
        assert_eq!(MacAddr::BROADCAST.classify(), MacAddrType::Broadcast);
        assert_eq!(MacAddr::parse("01:00:5e:00:00:01").unwrap().classify(), MacAddrType::Multicast);
        assert_eq!(MacAddr::parse("08:bf:b8:34:c6:a4").unwrap().classify(), MacAddrType::Unicast);
    }

    #[test]
    fn oui_prefix_is_first_three_octets() {
        let a = MacAddr::parse("08:bf:b8:34:c6:a4").unwrap();
        assert_eq!(a.oui_prefix(), [0x08, 0xbf, 0xb8]);
    }

    #[test]
    fn as_decimal_round_trips_through_from_bytes() {
        let a = MacAddr::parse("00:00:00:00:00:01").unwrap();
        assert_eq!(a.as_decimal(), 1);
        let b = MacAddr::parse("ff:ff:ff:ff:ff:ff").unwrap();
        assert_eq!(b.as_decimal(), 0xFFFF_FFFF_FFFF);
    }
}
