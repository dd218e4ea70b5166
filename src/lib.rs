//! Network addressing and protocol-decoding toolkit.
//!
//! Covers IPv4/IPv6 address, netmask, and wildcard modeling with IANA
//! special-purpose classification and subnet algebra ([`ip`]); a MAC address
//! type plus an IEEE OUI registry for vendor lookup ([`mac`]); and layered,
//! panic-free packet decoders for Ethernet/802.3, IPv4, ICMPv4, and TCP
//! ([`packet`]).
//!
//! ```rust
//! use netlinks::ip::config::IPv4HostConfig;
//! use netlinks::ip::{IPv4Addr, IPv4NetMask};
//!
//! let host = IPv4HostConfig::new(
//!     IPv4Addr::parse("192.168.1.10").unwrap(),
//!     IPv4NetMask::from_prefix_len(24).unwrap(),
//! );
//! assert_eq!(host.network_id().to_string(), "192.168.1.0");
//! ```

#![deny(missing_docs)]

/// Numeric/hex/binary codecs shared across address and packet types.
pub mod binary;
/// The crate's error taxonomy.
pub mod error;
/// IPv4/IPv6 addressing, subnet algebra, and classification.
pub mod ip;
/// MAC addressing and the IEEE OUI registry.
pub mod mac;
/// Layered, panic-free packet decoders.
pub mod packet;

pub use error::{NetlinksError, Result};
