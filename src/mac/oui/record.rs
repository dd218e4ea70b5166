//! OUI record shape and registry block types (C10).
//!
//! Mirrors the original `OUIType`/`OUIUnit` split: a type carries nothing but a
//! block size, a record carries everything IEEE publishes about one assignment.

use serde::{Deserialize, Serialize};

use crate::error::{NetlinksError, Result};

fn hex_to_decimal(hex: &str) -> Result<u64> {
    u64::from_str_radix(hex, 16).map_err(|e| NetlinksError::invalid_encoding(hex, e.to_string()))
}

/// Which IEEE registry an assignment was drawn from, each with its fixed block
/// size (`2^12 - 1`, `2^20 - 1`, or `2^24 - 1` addresses per assignment).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OuiType {
    /// Individual Address Block: 36-bit prefix, 4095-address block.
    Iab,
    /// MA-S (OUI-36): 36-bit prefix, 4095-address block.
    MaS,
    /// MA-M (OUI-28): 28-bit prefix, 1048575-address block.
    MaM,
    /// MA-L (OUI-24): 24-bit prefix, 16777215-address block.
    MaL,
    /// Company ID: non-MAC identifier sharing the MA-L block size.
    Cid,
}

impl OuiType {
    /// Number of addresses covered by one assignment of this type.
    pub fn block_size(self) -> u64 {
        match self {
            OuiType::Iab => 4095,
            OuiType::MaS => 4095,
            OuiType::MaM => 1_048_575,
            OuiType::MaL => 16_777_215,
            OuiType::Cid => 16_777_215,
        }
    }
}

/// One IEEE registry assignment: a hex range plus the organization it was
/// issued to. `start_decimal`/`end_decimal` are the 48-bit address-space bounds
/// used for binary-search lookup in [`super::store::OuiStore`], computed from
/// `oui_id` concatenated with `start_hex`/`end_hex` (the OUI prefix fixes the
/// high bits, `start_hex`/`end_hex` range over the low bits the assignment
/// actually covers).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuiRecord {
    /// Assignment prefix, upper-case hex, no separators (e.g. `"08BFB8"`).
    pub oui_id: String,
    /// Lower bound of the assigned range, upper-case hex, 6 digits.
    pub start_hex: String,
    /// Upper bound of the assigned range, upper-case hex, 6 digits.
    pub end_hex: String,
    /// `start_hex` as a 48-bit integer.
    pub start_decimal: u64,
    /// `end_hex` as a 48-bit integer.
    pub end_decimal: u64,
    /// Addresses covered by this assignment (see [`OuiType::block_size`]).
    pub block_size: u64,
    /// Which registry this assignment was drawn from.
    pub oui_type: OuiType,
    /// Organization name as published by IEEE.
    pub organization: String,
    /// Organization address as published by IEEE, or empty for private ranges.
    pub address: String,
}

impl OuiRecord {
    /// Builds a record from its hex range, computing the decimal bounds.
    pub fn new(
        oui_id: impl Into<String>,
        start_hex: impl Into<String>,
        end_hex: impl Into<String>,
        oui_type: OuiType,
        organization: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self> {
        let oui_id = oui_id.into();
        let start_hex = start_hex.into();
        let end_hex = end_hex.into();
        let start_decimal = hex_to_decimal(&format!("{oui_id}{start_hex}"))?;
        let end_decimal = hex_to_decimal(&format!("{oui_id}{end_hex}"))?;
        Ok(OuiRecord {
            oui_id,
            start_decimal,
            end_decimal,
            block_size: oui_type.block_size(),
            oui_type,
            start_hex,
            end_hex,
            organization: organization.into(),
            address: address.into(),
        })
    }

    /// The `(oui_id, start_decimal, end_decimal)` primary key used for dedup
    /// and upsert matching.
    pub fn key(&self) -> (String, u64, u64) {
        (self.oui_id.clone(), self.start_decimal, self.end_decimal)
    }

    /// Whether `decimal_value` (a MAC address read as a 48-bit integer) falls
    /// within this assignment's range.
    pub fn covers(&self, decimal_value: u64) -> bool {
        self.start_decimal <= decimal_value && decimal_value <= self.end_decimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_decimal_bounds_from_hex() {
        let rec = OuiRecord::new("08BFB8", "000000", "FFFFFF", OuiType::MaL, "Example Inc", "").unwrap();
        assert_eq!(rec.start_decimal, 0x08BFB8000000);
        assert_eq!(rec.end_decimal, 0x08BFB8FFFFFF);
        assert_eq!(rec.block_size, 16_777_215);
    }

    #[test]
    fn covers_checks_inclusive_range() {
        let rec = OuiRecord::new("08BFB8", "000000", "0000FF", OuiType::MaS, "Example Inc", "").unwrap();
        assert!(rec.covers(0x08BFB8000080));
        assert!(!rec.covers(0x08BFB8000100));
    }
}
