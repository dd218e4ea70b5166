//! Error taxonomy shared across address parsing, classification, subnet algebra,
//! the OUI registry, and packet decoding.
//!
//! See spec §7. Packet decoders do not use this type: short input is handled by
//! graceful truncation, not by returning an error.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, NetlinksError>;

/// The full error taxonomy. No panics cross the call boundary; every failure mode
/// described in spec §7 is a variant here, except `NotFound`, which is represented
/// structurally (an empty `Vec`/`None`) rather than as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetlinksError {
    /// A malformed numeric or textual representation (bad hex digit, wrong digit
    /// count for the requested width, non-digit character).
    #[error("invalid encoding for input {input:?}: {reason}")]
    InvalidEncoding {
        /// The rejected input, stringified.
        input: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A recognizer accepted the input's shape but semantic validation failed
    /// (wrong octet count, mask bits not contiguous, value out of range for the
    /// address family's width).
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input, stringified.
        input: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A classifier received an address of the wrong family.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// What family was expected.
        expected: &'static str,
        /// What family was actually supplied.
        actual: &'static str,
    },

    /// An out-of-range argument: a division target prefix outside `(p, width]`,
    /// an empty input set to a minimal-wildcard/merge call, etc.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable reason.
        reason: String,
    },

    /// A set of subnets does not form a complete cover of any candidate supernet.
    #[error("subnets do not merge into a single supernet")]
    MergeFailure,

    /// A persistence-layer error during OUI ingestion (I/O, serialization).
    #[error("oui store error: {reason}")]
    StoreError {
        /// Human-readable reason.
        reason: String,
    },
}

impl NetlinksError {
    pub(crate) fn invalid_encoding(input: impl Into<String>, reason: impl Into<String>) -> Self {
        NetlinksError::InvalidEncoding {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        NetlinksError::InvalidAddress {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        NetlinksError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn store(reason: impl Into<String>) -> Self {
        NetlinksError::StoreError {
            reason: reason.into(),
        }
    }
}
