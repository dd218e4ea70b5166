//! ICMPv4 message decoding (C13).

use crate::packet::ipv4::Ipv4Packet;
use crate::packet::{clipped_slice, read_u16, read_u32, read_u8};

/// A borrowed view over one ICMPv4 message. The common header (`type`,
/// `code`, `checksum`) is always at the same offsets; everything after it is
/// interpreted according to `kind()`.
#[derive(Clone, Copy, Debug)]
pub struct IcmpPacket<'a> {
    bytes: &'a [u8],
}

impl<'a> IcmpPacket<'a> {
    /// Wraps a byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        IcmpPacket { bytes }
    }

    /// Byte `[0..1)`.
    pub fn message_type(&self) -> u8 {
        read_u8(self.bytes, 0)
    }

    /// Byte `[1..2)`.
    pub fn code(&self) -> u8 {
        read_u8(self.bytes, 1)
    }

    /// Bytes `[2..4)`.
    pub fn checksum(&self) -> u16 {
        read_u16(self.bytes, 2)
    }

    /// Which message layout `message_type` selects.
    pub fn kind(&self) -> IcmpKind {
        IcmpKind::from(self.message_type())
    }

    /// Rest-of-header bytes, starting at offset 4, interpreted per
    /// [`IcmpPacket::kind`].
    pub fn body(&self) -> IcmpBody<'a> {
        match self.kind() {
            IcmpKind::EchoRequest | IcmpKind::EchoReply => IcmpBody::Echo {
                identifier: read_u16(self.bytes, 4),
                sequence: read_u16(self.bytes, 6),
                payload: clipped_slice(self.bytes, 8, self.bytes.len()),
            },
            IcmpKind::DestinationUnreachable | IcmpKind::TimeExceeded => IcmpBody::WithInnerPacket {
                inner: Ipv4Packet::new(clipped_slice(self.bytes, 8, self.bytes.len())),
            },
            IcmpKind::Redirect => IcmpBody::Redirect {
                gateway: read_u32(self.bytes, 4),
                inner: Ipv4Packet::new(clipped_slice(self.bytes, 8, self.bytes.len())),
            },
            IcmpKind::ParameterProblem => IcmpBody::ParameterProblem {
                pointer: read_u8(self.bytes, 4),
                inner: Ipv4Packet::new(clipped_slice(self.bytes, 8, self.bytes.len())),
            },
            IcmpKind::Timestamp | IcmpKind::TimestampReply => IcmpBody::Timestamp {
                identifier: read_u16(self.bytes, 4),
                sequence: read_u16(self.bytes, 6),
                originate: read_u32(self.bytes, 8),
                receive: read_u32(self.bytes, 12),
                transmit: read_u32(self.bytes, 16),
            },
            IcmpKind::Other(_) => IcmpBody::Unrecognized {
                payload: clipped_slice(self.bytes, 4, self.bytes.len()),
            },
        }
    }
}

/// The ICMPv4 message type, with unrecognized values preserved rather than
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IcmpKind {
    /// Echo Reply (0).
    EchoReply,
    /// Destination Unreachable (3).
    DestinationUnreachable,
    /// Redirect (5).
    Redirect,
    /// Echo Request (8).
    EchoRequest,
    /// Time Exceeded (11).
    TimeExceeded,
    /// Parameter Problem (12).
    ParameterProblem,
    /// Timestamp (13).
    Timestamp,
    /// Timestamp Reply (14).
    TimestampReply,
    /// A value this crate doesn't give a name to.
    Other(u8),
}

impl From<u8> for IcmpKind {
    fn from(value: u8) -> Self {
        match value {
            0 => IcmpKind::EchoReply,
            3 => IcmpKind::DestinationUnreachable,
            5 => IcmpKind::Redirect,
            8 => IcmpKind::EchoRequest,
            11 => IcmpKind::TimeExceeded,
            12 => IcmpKind::ParameterProblem,
            13 => IcmpKind::Timestamp,
            14 => IcmpKind::TimestampReply,
            other => IcmpKind::Other(other),
        }
    }
}

impl From<IcmpKind> for u8 {
    fn from(value: IcmpKind) -> Self {
        match value {
            IcmpKind::EchoReply => 0,
            IcmpKind::DestinationUnreachable => 3,
            IcmpKind::Redirect => 5,
            IcmpKind::EchoRequest => 8,
            IcmpKind::TimeExceeded => 11,
            IcmpKind::ParameterProblem => 12,
            IcmpKind::Timestamp => 13,
            IcmpKind::TimestampReply => 14,
            IcmpKind::Other(v) => v,
        }
    }
}

/// The message-type-specific rest of an ICMPv4 message.
#[derive(Clone, Copy, Debug)]
pub enum IcmpBody<'a> {
    /// `EchoRequest`/`EchoReply`: an identifier, sequence number, and
    /// arbitrary echoed payload.
    Echo {
        /// Byte `[4..6)`.
        identifier: u16,
        /// Byte `[6..8)`.
        sequence: u16,
        /// Bytes `[8..)`.
        payload: &'a [u8],
    },
    /// `DestinationUnreachable`/`TimeExceeded`: 4 unused bytes, then the
    /// offending IPv4 packet.
    WithInnerPacket {
        /// The inner packet, starting at byte 8.
        inner: Ipv4Packet<'a>,
    },
    /// `Redirect`: a gateway address, then the offending IPv4 packet.
    Redirect {
        /// Byte `[4..8)`.
        gateway: u32,
        /// The inner packet, starting at byte 8.
        inner: Ipv4Packet<'a>,
    },
    /// `ParameterProblem`: a pointer byte, 3 unused bytes, then the
    /// offending IPv4 packet.
    ParameterProblem {
        /// Byte `[4..5)`.
        pointer: u8,
        /// The inner packet, starting at byte 8.
        inner: Ipv4Packet<'a>,
    },
    /// `Timestamp`/`TimestampReply`: an identifier, sequence, and three
    /// 32-bit millisecond-since-midnight-UTC timestamps.
    Timestamp {
        /// Byte `[4..6)`.
        identifier: u16,
        /// Byte `[6..8)`.
        sequence: u16,
        /// Bytes `[8..12)`.
        originate: u32,
        /// Bytes `[12..16)`.
        receive: u32,
        /// Bytes `[16..20)`.
        transmit: u32,
    },
    /// A message type this crate doesn't give a specific layout to.
    Unrecognized {
        /// Bytes `[4..)`.
        payload: &'a [u8],
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_echo_request_identifier_and_sequence() {
        let mut bytes = vec![8, 0, 0, 0];
        bytes.extend_from_slice(&0x1234u16.to_be_bytes());
        bytes.extend_from_slice(&0x0001u16.to_be_bytes());
        bytes.extend_from_slice(b"ping");
        let pkt = IcmpPacket::new(&bytes);
        assert_eq!(pkt.kind(), IcmpKind::EchoRequest);
        match pkt.body() {
            IcmpBody::Echo { identifier, sequence, payload } => {
                assert_eq!(identifier, 0x1234);
                assert_eq!(sequence, 0x0001);
                assert_eq!(payload, b"ping");
            }
            other => panic!("expected Echo body, got {other:?}"),
        }
    }

    #[test]
    fn decodes_destination_unreachable_inner_packet() {
        let mut bytes = vec![3, 1, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&[0x45, 0x00, 0x00, 0x14]);
        let pkt = IcmpPacket::new(&bytes);
        assert_eq!(pkt.kind(), IcmpKind::DestinationUnreachable);
        match pkt.body() {
            IcmpBody::WithInnerPacket { inner } => assert_eq!(inner.version(), 4),
            other => panic!("expected WithInnerPacket, got {other:?}"),
        }
    }
}
