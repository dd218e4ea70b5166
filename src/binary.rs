//! Numeric codecs: conversions among binary strings, hex, decimals, and
//! big-endian byte buffers of fixed widths (C1).
//!
//! All numeric outputs are big-endian; string outputs right-justify with leading
//! zeros to the requested width. Width mismatches and non-digit characters fail
//! with [`NetlinksError::InvalidEncoding`].

use crate::error::{NetlinksError, Result};

/// Parses a string of `'0'`/`'1'` characters (MSB first) into an unsigned integer.
pub fn binary_to_decimal(binary: &str) -> Result<u128> {
    if binary.is_empty() || !binary.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(NetlinksError::invalid_encoding(
            binary,
            "expected a non-empty string of '0'/'1' characters",
        ));
    }
    u128::from_str_radix(binary, 2)
        .map_err(|e| NetlinksError::invalid_encoding(binary, e.to_string()))
}

/// Renders `n` as a binary string right-justified with leading zeros to `width` bits.
pub fn decimal_to_binary(n: u128, width: usize) -> Result<String> {
    if width < 128 && n >= (1_u128 << width) {
        return Err(NetlinksError::invalid_encoding(
            n.to_string(),
            format!("value does not fit in {width} bits"),
        ));
    }
    Ok(format!("{n:0width$b}"))
}

/// Converts a binary string to its hex representation, preserving leading zeros
/// for whole nibbles.
pub fn binary_to_hex(binary: &str) -> Result<String> {
    let n = binary_to_decimal(binary)?;
    let hex_width = (binary.len() + 3) / 4;
    Ok(format!("{n:0hex_width$x}"))
}

/// Parses a hex string into a binary string right-justified to `width` bits.
pub fn hex_to_binary(hex: &str, width: usize) -> Result<String> {
    let n = u128::from_str_radix(hex, 16)
        .map_err(|e| NetlinksError::invalid_encoding(hex, e.to_string()))?;
    decimal_to_binary(n, width)
}

/// Encodes `n` as `len` big-endian bytes. Fails if `n` does not fit in `len` bytes.
pub fn decimal_to_bytes(n: u128, len: usize) -> Result<Vec<u8>> {
    if len < 16 && n >= (1_u128 << (len * 8)) {
        return Err(NetlinksError::invalid_encoding(
            n.to_string(),
            format!("value does not fit in {len} bytes"),
        ));
    }
    let full = n.to_be_bytes(); // 16 bytes
    Ok(full[16 - len..].to_vec())
}

/// Reads a big-endian byte slice as an unsigned integer.
pub fn bytes_to_decimal(bytes: &[u8]) -> u128 {
    let mut n: u128 = 0;
    for &b in bytes {
        n = (n << 8) | b as u128;
    }
    n
}

/// Encodes `n` as a hex string right-justified with leading zeros to `hex_width`
/// nibbles.
pub fn decimal_to_hex(n: u128, hex_width: usize) -> Result<String> {
    if hex_width < 32 && n >= (1_u128 << (hex_width * 4)) {
        return Err(NetlinksError::invalid_encoding(
            n.to_string(),
            format!("value does not fit in {hex_width} hex digits"),
        ));
    }
    Ok(format!("{n:0hex_width$x}"))
}

/// Parses a hex string into big-endian bytes of exactly `len` bytes.
pub fn hex_to_bytes(hex: &str, len: usize) -> Result<Vec<u8>> {
    let n = u128::from_str_radix(hex, 16)
        .map_err(|e| NetlinksError::invalid_encoding(hex, e.to_string()))?;
    decimal_to_bytes(n, len)
}

/// Renders big-endian bytes as a hex string (no leading-zero trimming; every byte
/// becomes exactly two hex digits).
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Renders a big-endian byte buffer as an MSB-first binary string, one char per bit.
pub fn bytes_to_binary(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:08b}")).collect()
}

/// Parses an MSB-first binary string of length a multiple of 8 into bytes.
pub fn binary_to_bytes(binary: &str) -> Result<Vec<u8>> {
    if binary.len() % 8 != 0 {
        return Err(NetlinksError::invalid_encoding(
            binary,
            "binary string length must be a multiple of 8",
        ));
    }
    binary
        .as_bytes()
        .chunks(8)
        .map(|chunk| {
            let s = core::str::from_utf8(chunk).unwrap();
            u8::from_str_radix(s, 2).map_err(|e| NetlinksError::invalid_encoding(binary, e.to_string()))
        })
        .collect()
}

/// Lazily yields the MSB-first bits of a big-endian byte buffer.
pub fn bit_iter(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
}

/// Packs an MSB-first sequence of 0/1 bits into bytes. `bits.len()` must be a
/// multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(NetlinksError::invalid_encoding(
            format!("{} bits", bits.len()),
            "bit count must be a multiple of 8",
        ));
    }
    Ok(bits
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0_u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect())
}

/// Counts the number of set bits (1s) across a byte buffer.
pub fn popcount(bytes: &[u8]) -> u32 {
    bytes.iter().map(|b| b.count_ones()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_decimal_round_trip() {
        assert_eq!(binary_to_decimal("1010").unwrap(), 10);
        assert_eq!(decimal_to_binary(10, 4).unwrap(), "1010");
        assert_eq!(decimal_to_binary(10, 8).unwrap(), "00001010");
    }

    #[test]
    fn rejects_non_digit_binary() {
        assert!(binary_to_decimal("102").is_err());
        assert!(binary_to_decimal("").is_err());
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(binary_to_hex("11111111").unwrap(), "ff");
        assert_eq!(hex_to_binary("ff", 8).unwrap(), "11111111");
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = decimal_to_bytes(0x0102_0304, 4).unwrap();
        assert_eq!(bytes, vec![0x01, 0x02, 0x03, 0x04]);
        assert_eq!(bytes_to_decimal(&bytes), 0x0102_0304);
    }

    #[test]
    fn width_overflow_rejected() {
        assert!(decimal_to_bytes(256, 1).is_err());
        assert!(decimal_to_binary(256, 8).is_err());
    }

    #[test]
    fn binary_bytes_round_trip() {
        let bytes = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let binary = bytes_to_binary(&bytes);
        assert_eq!(binary_to_bytes(&binary).unwrap(), bytes);
    }
}
