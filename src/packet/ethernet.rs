//! Ethernet II / IEEE 802.3 framing (C11).

use crate::mac::addr::MacAddr;
use crate::packet::{clipped_slice, read_u16, read_u8};

/// The threshold below which bytes `[12..14)` are read as an IEEE 802.3
/// payload length rather than an Ethernet II EtherType.
const ETHERTYPE_THRESHOLD: u16 = 1536;

/// A borrowed view over one Ethernet frame. Destination MAC comes first on
/// the wire, then source, then the EtherType-or-length field that decides
/// everything after it.
#[derive(Clone, Copy, Debug)]
pub struct EthernetFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> EthernetFrame<'a> {
    /// Wraps a byte slice. No length check: short frames decode with
    /// zeroed/empty fields rather than failing.
    pub fn new(bytes: &'a [u8]) -> Self {
        EthernetFrame { bytes }
    }

    /// Destination address, bytes `[0..6)`.
    pub fn dst(&self) -> MacAddr {
        MacAddr::from_bytes(clipped_slice(self.bytes, 0, 6)).unwrap_or_default()
    }

    /// Source address, bytes `[6..12)`.
    pub fn src(&self) -> MacAddr {
        MacAddr::from_bytes(clipped_slice(self.bytes, 6, 12)).unwrap_or_default()
    }

    /// The raw value of bytes `[12..14)`, either an EtherType or an IEEE
    /// 802.3 payload length depending on its magnitude.
    pub fn ethertype_or_length(&self) -> u16 {
        read_u16(self.bytes, 12)
    }

    /// Which framing this value selects.
    pub fn kind(&self) -> FrameKind {
        if self.ethertype_or_length() >= ETHERTYPE_THRESHOLD {
            FrameKind::EthernetII
        } else {
            FrameKind::Ieee8023
        }
    }

    /// The EtherType, valid only when [`EthernetFrame::kind`] is
    /// [`FrameKind::EthernetII`].
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(self.ethertype_or_length())
    }

    /// The 802.3 payload length, valid only when [`EthernetFrame::kind`] is
    /// [`FrameKind::Ieee8023`].
    pub fn length(&self) -> u16 {
        self.ethertype_or_length()
    }

    /// The LLC header, present only for [`FrameKind::Ieee8023`] frames.
    pub fn llc(&self) -> LlcHeader {
        LlcHeader {
            dsap: read_u8(self.bytes, 14),
            ssap: read_u8(self.bytes, 15),
            control: read_u8(self.bytes, 16),
        }
    }

    /// The SNAP header, present when the LLC header's DSAP and SSAP are both
    /// `0xAA`. `None` otherwise.
    pub fn snap(&self) -> Option<SnapHeader> {
        let llc = self.llc();
        if llc.dsap != 0xAA || llc.ssap != 0xAA {
            return None;
        }
        let oui_bytes = clipped_slice(self.bytes, 17, 20);
        let mut oui = [0u8; 3];
        oui[..oui_bytes.len()].copy_from_slice(oui_bytes);
        Some(SnapHeader {
            oui,
            protocol_id: read_u16(self.bytes, 20),
        })
    }

    /// The payload, whose start depends on framing: 14 for Ethernet II, 22
    /// for 802.3+SNAP, 17 for plain 802.3.
    pub fn payload(&self) -> &'a [u8] {
        match self.kind() {
            FrameKind::EthernetII => clipped_slice(self.bytes, 14, self.bytes.len()),
            FrameKind::Ieee8023 => {
                let start = if self.snap().is_some() { 22 } else { 17 };
                clipped_slice(self.bytes, start, self.bytes.len())
            }
        }
    }

    /// Recognizes a handful of well-known next layers from the EtherType or
    /// SNAP OUI/PID, for protocols this crate does not otherwise decode.
    pub fn next_layer(&self) -> NextLayer {
        if let Some(snap) = self.snap() {
            if snap.oui == [0x00, 0x00, 0x0C] && snap.protocol_id == 0x2000 {
                return NextLayer::Cdp;
            }
            return NextLayer::Unrecognized;
        }
        match self.kind() {
            FrameKind::EthernetII => match self.ethertype() {
                EtherType::Ipv4 => NextLayer::Ipv4,
                _ => NextLayer::Unrecognized,
            },
            FrameKind::Ieee8023 => NextLayer::Unrecognized,
        }
    }
}

/// Which framing an Ethernet frame uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Bytes `[12..14)` are an EtherType (`>= 1536`).
    EthernetII,
    /// Bytes `[12..14)` are an IEEE 802.3 payload length (`< 1536`).
    Ieee8023,
}

/// An IEEE 802.2 LLC header: destination/source service access points and a
/// control byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LlcHeader {
    /// Destination service access point.
    pub dsap: u8,
    /// Source service access point.
    pub ssap: u8,
    /// Control field.
    pub control: u8,
}

/// A SNAP header: a 3-byte OUI plus a 2-byte protocol ID, extending an LLC
/// header whose DSAP/SSAP are both `0xAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapHeader {
    /// Organizationally unique identifier the protocol ID is scoped under.
    pub oui: [u8; 3],
    /// Protocol ID, scoped by `oui`.
    pub protocol_id: u16,
}

/// The EtherType field, with unrecognized values preserved rather than
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (`0x0800`).
    Ipv4,
    /// ARP (`0x0806`).
    Arp,
    /// IEEE 802.1Q VLAN tag (`0x8100`).
    Vlan,
    /// IPv6 (`0x86DD`).
    Ipv6,
    /// A value this crate doesn't give a name to.
    Unknown(u16),
}

impl From<u16> for EtherType {
    fn from(value: u16) -> Self {
        match value {
            0x0800 => EtherType::Ipv4,
            0x0806 => EtherType::Arp,
            0x8100 => EtherType::Vlan,
            0x86DD => EtherType::Ipv6,
            other => EtherType::Unknown(other),
        }
    }
}

impl From<EtherType> for u16 {
    fn from(value: EtherType) -> Self {
        match value {
            EtherType::Ipv4 => 0x0800,
            EtherType::Arp => 0x0806,
            EtherType::Vlan => 0x8100,
            EtherType::Ipv6 => 0x86DD,
            EtherType::Unknown(v) => v,
        }
    }
}

/// A next-layer protocol this crate can name from Ethernet/SNAP framing
/// alone, without decoding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextLayer {
    /// IPv4, decodable via [`crate::packet::ipv4`].
    Ipv4,
    /// Cisco Discovery Protocol, identified by SNAP OUI `00:00:0C` PID `0x2000`.
    Cdp,
    /// No next-layer protocol recognized.
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        (0..s.len()).step_by(2).map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap()).collect()
    }

    #[test]
    fn decodes_ethernet_ii_with_ipv4_ethertype() {
        let bytes = hex("08bfb834c6a4 089bb93afe82 0800 00112233");
        let frame = EthernetFrame::new(&bytes);
        assert_eq!(frame.kind(), FrameKind::EthernetII);
        assert_eq!(frame.dst().to_string(), "08:BF:B8:34:C6:A4");
        assert_eq!(frame.src().to_string(), "08:9B:B9:3A:FE:82");
        assert_eq!(frame.ethertype(), EtherType::Ipv4);
        assert_eq!(frame.payload(), &[0x00, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn decodes_ieee_8023_with_empty_snap() {
        let mut bytes = vec![0u8; 12];
        bytes.extend_from_slice(&0x0027u16.to_be_bytes());
        bytes.extend_from_slice(&[0x42, 0x42, 0x03]);
        let frame = EthernetFrame::new(&bytes);
        assert_eq!(frame.kind(), FrameKind::Ieee8023);
        assert_eq!(frame.length(), 0x0027);
        assert_eq!(frame.llc(), LlcHeader { dsap: 0x42, ssap: 0x42, control: 0x03 });
        assert!(frame.snap().is_none());
    }

    #[test]
    fn recognizes_cdp_via_snap_oui_and_pid() {
        let mut bytes = vec![0u8; 12];
        bytes.extend_from_slice(&0x002Eu16.to_be_bytes());
        bytes.extend_from_slice(&[0xAA, 0xAA, 0x03]);
        bytes.extend_from_slice(&[0x00, 0x00, 0x0C]);
        bytes.extend_from_slice(&0x2000u16.to_be_bytes());
        bytes.extend_from_slice(&[0xde, 0xad]);
        let frame = EthernetFrame::new(&bytes);
        assert_eq!(frame.next_layer(), NextLayer::Cdp);
        assert_eq!(frame.payload(), &[0xde, 0xad]);
    }

    #[test]
    fn truncated_frame_reads_empty_payload_instead_of_panicking() {
        let bytes = hex("08bfb834c6a4 089bb93afe82 08");
        let frame = EthernetFrame::new(&bytes);
        assert_eq!(frame.ethertype_or_length(), 0);
        assert!(frame.payload().is_empty());
    }
}
