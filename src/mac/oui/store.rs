//! OUI registry store (C10): an in-memory, sorted-by-`start_decimal` index
//! with binary-search lookup, plus JSON persistence.
//!
//! Ranges across different registry types are allowed to overlap (an MA-L
//! block and a CID assignment can legitimately cover the same address), so a
//! lookup returns every covering record rather than the first match.

use std::fs;
use std::path::Path;

use crate::error::{NetlinksError, Result};
use crate::mac::addr::MacAddr;
use crate::mac::oui::record::OuiRecord;

/// A sorted, searchable collection of [`OuiRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct OuiStore {
    records: Vec<OuiRecord>,
}

impl OuiStore {
    /// An empty store.
    pub fn new() -> Self {
        OuiStore { records: Vec::new() }
    }

    /// Inserts or replaces records, keyed by `(oui_id, start_decimal,
    /// end_decimal)`; a record whose key already exists is overwritten in
    /// place rather than duplicated. Re-sorts once after the whole batch.
    pub fn batch_upsert(&mut self, incoming: Vec<OuiRecord>) {
        for record in incoming {
            match self.records.iter_mut().find(|r| r.key() == record.key()) {
                Some(slot) => *slot = record,
                None => self.records.push(record),
            }
        }
        self.records.sort_by_key(|r| r.start_decimal);
    }

    /// Total number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record whose range covers `addr`, via binary search to a hit
    /// followed by a linear scan outward while overlap holds. `O(log n + k)`
    /// for `k` covering records.
    pub fn lookup(&self, addr: &MacAddr) -> Vec<&OuiRecord> {
        self.lookup_decimal(addr.as_decimal())
    }

    /// As [`OuiStore::lookup`], but keyed directly on the 48-bit integer form.
    pub fn lookup_decimal(&self, decimal_value: u64) -> Vec<&OuiRecord> {
        let mut results = Vec::new();
        let Some(mid) = self.binary_search_hit(decimal_value) else {
            return results;
        };
        results.push(&self.records[mid]);

        let mut left = mid;
        while left > 0 {
            left -= 1;
            if self.records[left].covers(decimal_value) {
                results.push(&self.records[left]);
            } else {
                break;
            }
        }

        let mut right = mid + 1;
        while right < self.records.len() && self.records[right].covers(decimal_value) {
            results.push(&self.records[right]);
            right += 1;
        }

        results
    }

    fn binary_search_hit(&self, decimal_value: u64) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let mut left = 0_isize;
        let mut right = self.records.len() as isize - 1;
        while left <= right {
            let mid = (left + right) / 2;
            let rec = &self.records[mid as usize];
            if decimal_value < rec.start_decimal {
                right = mid - 1;
            } else if decimal_value > rec.end_decimal {
                left = mid + 1;
            } else {
                return Some(mid as usize);
            }
        }
        None
    }

    /// Persists the store as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(&self.records)
            .map_err(|e| NetlinksError::store(format!("failed to serialize oui store: {e}")))?;
        fs::write(path, json).map_err(|e| NetlinksError::store(format!("failed to write oui store: {e}")))
    }

    /// Loads a previously-saved JSON store, replacing any in-memory records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| NetlinksError::store(format!("failed to read oui store: {e}")))?;
        let records: Vec<OuiRecord> =
            serde_json::from_str(&json).map_err(|e| NetlinksError::store(format!("failed to parse oui store: {e}")))?;
        let mut store = OuiStore { records };
        store.records.sort_by_key(|r| r.start_decimal);
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::oui::record::OuiType;

    fn rec(oui_id: &str, start: &str, end: &str, org: &str) -> OuiRecord {
        OuiRecord::new(oui_id, start, end, OuiType::MaL, org, "").unwrap()
    }

    #[test]
    fn lookup_finds_covering_record() {
        let mut store = OuiStore::new();
        store.batch_upsert(vec![
            rec("000000", "000000", "FFFFFF", "Block A"),
            rec("010000", "000000", "FFFFFF", "Block B"),
        ]);
        let addr = MacAddr::parse("00:00:00:12:34:56").unwrap();
        let hits = store.lookup(&addr);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].organization, "Block A");
    }

    #[test]
    fn lookup_returns_all_overlapping_records() {
        let mut store = OuiStore::new();
        store.batch_upsert(vec![
            rec("000000", "000000", "FFFFFF", "Wide"),
            rec("000000", "001000", "001FFF", "Narrow"),
        ]);
        let hits = store.lookup_decimal(0x001500);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn upsert_overwrites_matching_key() {
        let mut store = OuiStore::new();
        store.batch_upsert(vec![rec("000000", "000000", "FFFFFF", "Old Name")]);
        store.batch_upsert(vec![rec("000000", "000000", "FFFFFF", "New Name")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup_decimal(0x000000000000).first().unwrap().organization, "New Name");
    }

    #[test]
    fn lookup_miss_returns_empty() {
        let store = OuiStore::new();
        assert!(store.lookup_decimal(42).is_empty());
    }
}
