//! Format recognizers (C3): cheap, fallible-free predicates that answer "does
//! this input look like an X" without fully parsing it. [`crate::ip::standardize`]
//! tries candidate forms in order using these predicates before handing off to
//! the real parser in [`crate::ip::convert`].

/// True if `input` has the shape of dotted-decimal IPv4 text (four dot-separated
/// groups of 1-3 digits, not necessarily in range).
pub fn looks_like_ipv4_text(input: &str) -> bool {
    let parts: Vec<&str> = input.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.len() <= 3 && p.bytes().all(|b| b.is_ascii_digit()))
}

/// True if `input` is `"/N"` CIDR notation.
pub fn looks_like_cidr_suffix(input: &str) -> bool {
    input
        .strip_prefix('/')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// True if `bytes` has the length of a raw IPv4 address/mask buffer.
pub fn looks_like_ipv4_bytes(bytes: &[u8]) -> bool {
    bytes.len() == 4
}

/// True if `input` has the shape of IPv6 textual notation: hex groups separated
/// by `:`, optionally with one `::` compression marker and an embedded dotted
/// IPv4 tail.
pub fn looks_like_ipv6_text(input: &str) -> bool {
    if !input.contains(':') {
        return false;
    }
    if input.matches("::").count() > 1 {
        return false;
    }
    input
        .split(':')
        .all(|group| group.is_empty() || group.chars().all(|c| c.is_ascii_hexdigit() || c == '.'))
}

/// True if `bytes` has the length of a raw IPv6 address/mask buffer.
pub fn looks_like_ipv6_bytes(bytes: &[u8]) -> bool {
    bytes.len() == 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_text_shape() {
        assert!(looks_like_ipv4_text("192.168.1.1"));
        assert!(!looks_like_ipv4_text("192.168.1"));
        assert!(!looks_like_ipv4_text("fe80::1"));
    }

    #[test]
    fn cidr_suffix_shape() {
        assert!(looks_like_cidr_suffix("/24"));
        assert!(!looks_like_cidr_suffix("/"));
        assert!(!looks_like_cidr_suffix("24"));
    }

    #[test]
    fn ipv6_text_shape() {
        assert!(looks_like_ipv6_text("::1"));
        assert!(looks_like_ipv6_text("::ffff:192.0.2.1"));
        assert!(!looks_like_ipv6_text("192.168.1.1"));
    }
}
