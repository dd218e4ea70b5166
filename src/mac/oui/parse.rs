//! IEEE OUI file ingestion (C10): the public-registry TXT and CSV dumps IEEE
//! publishes for each of the IAB/MA-S/MA-M/MA-L/CID blocks.
//!
//! A malformed record (line that doesn't match the expected shape, CSV row
//! short of columns) is skipped and logged rather than aborting the whole
//! file, since a single publisher typo should not take down ingestion of an
//! otherwise-good file.

use crate::mac::oui::record::{OuiRecord, OuiType};

/// Parses one of the IEEE "OUI/MA-L"-style TXT dumps (also used, with a
/// different section header, for IAB/MA-S/MA-M/CID). Each record spans a
/// blank-line-delimited paragraph:
///
/// ```text
/// 08-BF-B8   (hex)		Some Company, Inc.
/// 08BFB8-08BFB8     (base 16)		Some Company, Inc.
/// 				1 Infinite Loop
/// 				Cupertino CA 95014
/// 				US
/// ```
///
/// MA-L/CID dumps omit the explicit hex range on the second line (one `OUI`
/// hex token instead of a `START-END` pair); the full `/24` block is implied.
pub fn parse_txt(content: &str, oui_type: OuiType) -> Vec<OuiRecord> {
    let mut records = Vec::new();
    let mut skipped = 0;
    for segment in content.split("\n\n") {
        if segment.trim().is_empty() {
            continue;
        }
        match parse_txt_segment(segment, oui_type) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    log::debug!("parsed {} {oui_type:?} records from txt, skipped {skipped}", records.len());
    records
}

fn parse_txt_segment(segment: &str, oui_type: OuiType) -> Option<OuiRecord> {
    let mut lines = segment.lines();
    let header = lines.next()?.trim();
    let (oui_hex, company1) = split_once_whitespace_after(header, "(hex)")?;
    let oui_id = oui_hex.replace('-', "").to_ascii_uppercase();
    if oui_id.len() != 6 || !oui_id.bytes().all(|b| b.is_ascii_hexdigit()) {
        log::warn!("skipping malformed OUI header {header:?}");
        return None;
    }

    let range_line = lines.next()?.trim();
    let (range_token, company2) = split_once_whitespace_after(range_line, "(base 16)")?;
    let (start_hex, end_hex) = if let Some((start, end)) = range_token.split_once('-') {
        (pad_hex(start), pad_hex(end))
    } else {
        ("000000".to_string(), "FFFFFF".to_string())
    };

    let organization = if !company1.is_empty() { company1 } else { company2 };
    let address_lines: Vec<&str> = lines.map(str::trim).filter(|l| !l.is_empty()).collect();
    let address = format_address(&address_lines);

    OuiRecord::new(oui_id, start_hex, end_hex, oui_type, organization, address).ok()
}

fn split_once_whitespace_after<'a>(line: &'a str, marker: &str) -> Option<(&'a str, String)> {
    let idx = line.find(marker)?;
    let before = line[..idx].trim();
    let after = line[idx + marker.len()..].trim().to_string();
    Some((before, after))
}

fn pad_hex(part: &str) -> String {
    format!("{part:0>6}").to_ascii_uppercase()
}

fn format_address(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    lines.join(", ")
}

/// Parses one of IEEE's CSV registry exports (`Registry,Assignment,Organization
/// Name,Organization Address`). `assignment` carries the hex prefix with no
/// separators; its width depends on the registry (6 hex digits for MA-L/CID,
/// 7 for MA-M, 9 for IAB/MA-S), and the remaining low-order digits of the
/// 24-bit MAC prefix are padded with `0`s (range start) and `F`s (range end).
pub fn parse_csv(content: &str, oui_type: OuiType) -> Vec<OuiRecord> {
    let mut records = Vec::new();
    let mut skipped = 0;
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    for row in reader.records().flatten() {
        if row.len() < 4 {
            log::warn!("skipping short CSV row {row:?}");
            skipped += 1;
            continue;
        }
        let assignment = row[1].trim();
        if assignment.len() < 6 {
            log::warn!("skipping malformed assignment {assignment:?}");
            skipped += 1;
            continue;
        }
        let oui_id = assignment[..6].to_ascii_uppercase();
        let remainder = &assignment[6..];
        let start_hex = format!("{remainder:0<6}").to_ascii_uppercase();
        let end_hex = format!("{remainder:F<6}").to_ascii_uppercase();
        let organization = row[2].trim().to_string();
        let address = row[3].trim().to_string();

        match OuiRecord::new(oui_id, start_hex, end_hex, oui_type, organization, address) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("skipping unparseable CSV row: {e}");
                skipped += 1;
            }
        }
    }
    log::debug!("parsed {} {oui_type:?} records from csv, skipped {skipped}", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mal_style_txt_segment() {
        let content = "08-BF-B8   (hex)\t\tExample Inc.\n08BFB8-08BFB8     (base 16)\t\tExample Inc.\n\t\t\t1 Infinite Loop\n\t\t\tCupertino CA 95014\n\t\t\tUS";
        let records = parse_txt(content, OuiType::MaL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].oui_id, "08BFB8");
        assert_eq!(records[0].start_hex, "08BFB8");
        assert_eq!(records[0].organization, "Example Inc.");
        assert!(records[0].address.contains("Cupertino"));
    }

    #[test]
    fn skips_malformed_segment_without_aborting() {
        let content = "garbage\n\n08-BF-B8   (hex)\t\tExample Inc.\n08BFB8-08BFB8     (base 16)\t\tExample Inc.";
        let records = parse_txt(content, OuiType::MaL);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn parses_csv_rows_and_pads_remainder() {
        let content = "Registry,Assignment,Organization Name,Organization Address\nMA-M,0050F2A,Example Corp,\"1 Example Way, Townsville\"\n";
        let records = parse_csv(content, OuiType::MaM);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].oui_id, "0050F2");
        assert_eq!(records[0].start_hex, "A00000");
        assert_eq!(records[0].end_hex, "AFFFFF");
    }
}
