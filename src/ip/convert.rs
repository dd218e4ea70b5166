//! Format recognizers and input converters for IPv4/IPv6 addresses and masks
//! (C3/C4).
//!
//! A recognizer/converter pair is collapsed into a single parsing function per
//! input family, tried in the order spec §4.3/§4.4 describes. The format-
//! recognition chain swallows shape mismatches silently and falls through to the
//! next candidate form; only once every form has been tried does parsing return a
//! typed [`NetlinksError::InvalidAddress`] (spec §7).

use crate::binary::bit_iter;
use crate::error::{NetlinksError, Result};

/// Parses IPv4 dotted-decimal text (`"A.B.C.D"`, four 0-255 octets) into bytes.
pub fn parse_ipv4_address_bytes(input: &str) -> Result<[u8; 4]> {
    parse_dotted_quad(input)
        .ok_or_else(|| NetlinksError::invalid_address(input, "not a valid dotted-decimal IPv4 address"))
}

/// Validates and copies a byte slice into a 4-byte IPv4 buffer.
pub fn bytes_to_ipv4_array(bytes: &[u8]) -> Result<[u8; 4]> {
    bytes
        .try_into()
        .map_err(|_| NetlinksError::invalid_address(format!("{bytes:?}"), "expected exactly 4 bytes"))
}

/// Validates and copies a byte slice into a 16-byte IPv6 buffer.
pub fn bytes_to_ipv6_array(bytes: &[u8]) -> Result<[u8; 16]> {
    bytes
        .try_into()
        .map_err(|_| NetlinksError::invalid_address(format!("{bytes:?}"), "expected exactly 16 bytes"))
}

/// Parses an IPv4 netmask: dotted-decimal text, `"/N"` CIDR notation, with
/// `0 <= N <= 32`. The resulting 32-bit pattern is validated for contiguity
/// (`1*0*`) per spec §3/§4.3.
pub fn parse_ipv4_mask_bytes(input: &str) -> Result<[u8; 4]> {
    let bytes = if let Some(rest) = input.strip_prefix('/') {
        cidr_prefix_bytes::<4>(rest)?
    } else {
        parse_dotted_quad(input)
            .ok_or_else(|| NetlinksError::invalid_address(input, "not a valid IPv4 netmask"))?
    };
    require_contiguous(&bytes, input)?;
    Ok(bytes)
}

/// Validates a 4-byte buffer as a contiguous IPv4 netmask.
pub fn bytes_to_ipv4_mask_array(bytes: &[u8]) -> Result<[u8; 4]> {
    let array = bytes_to_ipv4_array(bytes)?;
    require_contiguous(&array, &format!("{bytes:?}"))?;
    Ok(array)
}

/// Parses an IPv6 netmask: address-form text or `"/N"` CIDR notation, with
/// `0 <= N <= 128`, contiguity-checked over 128 bits.
pub fn parse_ipv6_mask_bytes(input: &str) -> Result<[u8; 16]> {
    let bytes = if let Some(rest) = input.strip_prefix('/') {
        cidr_prefix_bytes::<16>(rest)?
    } else {
        parse_ipv6_text(input)
            .ok_or_else(|| NetlinksError::invalid_address(input, "not a valid IPv6 netmask"))?
    };
    require_contiguous(&bytes, input)?;
    Ok(bytes)
}

/// Validates a 16-byte buffer as a contiguous IPv6 netmask.
pub fn bytes_to_ipv6_mask_array(bytes: &[u8]) -> Result<[u8; 16]> {
    let array = bytes_to_ipv6_array(bytes)?;
    require_contiguous(&array, &format!("{bytes:?}"))?;
    Ok(array)
}

/// Builds a `1^n 0^(WIDTH-n)` left-justified bit pattern of `WIDTH` bytes.
fn cidr_prefix_bytes<const WIDTH: usize>(n_str: &str) -> Result<[u8; WIDTH]> {
    let max_bits = WIDTH * 8;
    let n: usize = n_str
        .parse()
        .map_err(|_| NetlinksError::invalid_address(n_str, "CIDR prefix is not an integer"))?;
    if n > max_bits {
        return Err(NetlinksError::invalid_address(
            n_str,
            format!("CIDR prefix must be in 0..={max_bits}"),
        ));
    }
    let mut out = [0u8; WIDTH];
    for (i, byte) in out.iter_mut().enumerate() {
        let bit_offset = i * 8;
        if bit_offset + 8 <= n {
            *byte = 0xFF;
        } else if bit_offset < n {
            let ones = n - bit_offset;
            *byte = (0xFFu16 << (8 - ones)) as u8;
        }
    }
    Ok(out)
}

/// Checks that a byte buffer's bit pattern matches `1*0*` (spec §3).
fn require_contiguous(bytes: &[u8], input: &str) -> Result<()> {
    let mut seen_zero = false;
    for bit in bit_iter(bytes) {
        if bit == 0 {
            seen_zero = true;
        } else if seen_zero {
            return Err(NetlinksError::invalid_address(
                input,
                "mask bits are not contiguous (must match 1*0*)",
            ));
        }
    }
    Ok(())
}

/// Returns the count of leading 1 bits, or `None` if the pattern is not
/// contiguous.
pub fn mask_size(bytes: &[u8]) -> Option<u8> {
    let mut count = 0u8;
    let mut seen_zero = false;
    for bit in bit_iter(bytes) {
        if bit == 1 {
            if seen_zero {
                return None;
            }
            count += 1;
        } else {
            seen_zero = true;
        }
    }
    Some(count)
}

/// Parses four dot-separated octets in `0..=255`.
fn parse_dotted_quad(input: &str) -> Option<[u8; 4]> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 4 {
        return None;
    }
    let mut out = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || (part.len() > 1 && part.starts_with('0')) {
            return None;
        }
        out[i] = part.parse::<u8>().ok()?;
    }
    Some(out)
}

/// Parses any RFC 4291 IPv6 textual form, including `::` compression and an
/// embedded dotted-decimal low 32 bits (e.g. `::ffff:192.0.2.1`).
pub fn parse_ipv6_address_bytes(input: &str) -> Result<[u8; 16]> {
    parse_ipv6_text(input)
        .ok_or_else(|| NetlinksError::invalid_address(input, "not a valid IPv6 address"))
}

fn parse_ipv6_text(input: &str) -> Option<[u8; 16]> {
    if input.matches("::").count() > 1 {
        return None;
    }

    // Split off a trailing embedded IPv4 dotted-decimal group, if present.
    let (v6_part, embedded_v4) = match input.rsplit_once(':') {
        Some((head, tail)) if tail.contains('.') => {
            let quad = parse_dotted_quad(tail)?;
            (head, Some(quad))
        }
        _ => (input, None),
    };

    let (has_double_colon, left, right) = match v6_part.split_once("::") {
        Some((l, r)) => (true, l, r),
        None => (false, v6_part, ""),
    };

    let parse_groups = |s: &str| -> Option<Vec<u16>> {
        if s.is_empty() {
            return Some(vec![]);
        }
        s.split(':')
            .map(|g| u16::from_str_radix(g, 16).ok())
            .collect()
    };

    let left_groups = parse_groups(left)?;
    let right_groups = parse_groups(right)?;

    let embedded_groups = embedded_v4.map(|quad| {
        vec![
            u16::from_be_bytes([quad[0], quad[1]]),
            u16::from_be_bytes([quad[2], quad[3]]),
        ]
    });

    let mut groups: Vec<u16> = Vec::with_capacity(8);
    if has_double_colon {
        let explicit = left_groups.len() + right_groups.len() + embedded_groups.as_ref().map_or(0, |v| v.len());
        if explicit > 8 {
            return None;
        }
        let fill = 8 - explicit;
        groups.extend(left_groups);
        groups.extend(std::iter::repeat(0u16).take(fill));
        groups.extend(right_groups);
        if let Some(e) = embedded_groups {
            groups.extend(e);
        }
    } else {
        groups.extend(left_groups);
        if let Some(e) = embedded_groups {
            groups.extend(e);
        }
        if groups.len() != 8 {
            return None;
        }
    }

    if groups.len() != 8 {
        return None;
    }

    let mut out = [0u8; 16];
    for (i, g) in groups.iter().enumerate() {
        let bytes = g.to_be_bytes();
        out[2 * i] = bytes[0];
        out[2 * i + 1] = bytes[1];
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_expands_left_justified() {
        assert_eq!(cidr_prefix_bytes::<4>("24").unwrap(), [255, 255, 255, 0]);
        assert_eq!(cidr_prefix_bytes::<4>("0").unwrap(), [0, 0, 0, 0]);
        assert_eq!(cidr_prefix_bytes::<4>("32").unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn contiguity_enforced() {
        assert!(require_contiguous(&[255, 0, 255, 0], "x").is_err());
        assert!(require_contiguous(&[255, 255, 0, 0], "x").is_ok());
    }

    #[test]
    fn ipv4_mask_from_dotted_or_cidr_agree() {
        assert_eq!(
            parse_ipv4_mask_bytes("255.255.255.0").unwrap(),
            parse_ipv4_mask_bytes("/24").unwrap()
        );
    }

    #[test]
    fn ipv6_parses_compressed_and_embedded_v4() {
        let a = parse_ipv6_address_bytes("::1").unwrap();
        assert_eq!(a, {
            let mut b = [0u8; 16];
            b[15] = 1;
            b
        });
        let b = parse_ipv6_address_bytes("::ffff:192.0.2.1").unwrap();
        assert_eq!(&b[12..], &[192, 0, 2, 1]);
        assert_eq!(&b[10..12], &[0xff, 0xff]);
    }

    #[test]
    fn ipv6_rejects_double_double_colon() {
        assert!(parse_ipv6_text("1::2::3").is_none());
    }

    #[test]
    fn mask_size_undefined_when_noncontiguous() {
        assert_eq!(mask_size(&[255, 255, 0, 0]), Some(16));
        assert_eq!(mask_size(&[255, 0, 255, 0]), None);
    }
}
