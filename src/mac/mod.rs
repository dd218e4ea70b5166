//! MAC addressing and the IEEE OUI registry (C2, C6, C10).

/// MAC address value type and classification.
pub mod addr;
/// IEEE OUI registry: record shape, file ingestion, and lookup store.
pub mod oui;

pub use addr::{MacAddr, MacAddrType};
pub use oui::parse::{parse_csv, parse_txt};
pub use oui::record::{OuiRecord, OuiType};
pub use oui::store::OuiStore;
