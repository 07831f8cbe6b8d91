//! Conversions between the external (dotted-quad text) and internal (`u32`) forms of
//! an IPv4 address.
//!
//! Only canonical dotted quads are accepted: four decimal octets in `0..=255`, no
//! signs, no whitespace and no leading zeros. That makes text -> integer -> text
//! lossless for every accepted input.

use std::net::Ipv4Addr;

use crate::error::SweepError;

/// Parses a dotted quad into its 32-bit big-endian value.
pub fn to_u32(text: &str) -> Result<u32, SweepError> {
    parse_ipv4(text).map(u32::from)
}

/// Renders a 32-bit value as a dotted quad.
pub fn from_u32(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Parses a dotted quad, naming the offending octet on failure.
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr, SweepError> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(SweepError::malformed(
            text,
            format!("expected 4 dot-separated octets, found {}", parts.len()),
        ));
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(parts) {
        *slot = parse_octet(part)?;
    }

    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(token: &str) -> Result<u8, SweepError> {
    if token.is_empty() {
        return Err(SweepError::malformed(token, "empty octet"));
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SweepError::malformed(token, "octet is not a decimal number"));
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err(SweepError::malformed(token, "octet has a leading zero"));
    }
    // At most three digits keeps the value inside u16 before the range check.
    if token.len() > 3 {
        return Err(SweepError::malformed(token, "octet out of range 0-255"));
    }

    let value: u16 = token
        .parse()
        .map_err(|_| SweepError::malformed(token, "octet is not a decimal number"))?;
    u8::try_from(value).map_err(|_| SweepError::malformed(token, "octet out of range 0-255"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
