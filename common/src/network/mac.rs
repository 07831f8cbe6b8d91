//! Link-layer address parsing and presentation.
//!
//! Neighbor and ARP tables print MACs as `aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF` or,
//! on BSD-derived systems, with unpadded groups (`0:1a:2b:3:4:5`). All of them are
//! accepted here; output is always uppercase and colon-delimited.

use pnet::util::MacAddr;

/// Parses a colon- or hyphen-delimited MAC, case-insensitive.
pub fn parse_mac(text: &str) -> Option<MacAddr> {
    let separator = if text.contains(':') { ':' } else { '-' };
    let groups: Vec<&str> = text.split(separator).collect();
    if groups.len() != 6 {
        return None;
    }

    let mut octets = [0u8; 6];
    for (slot, group) in octets.iter_mut().zip(groups) {
        if group.is_empty() || group.len() > 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        *slot = u8::from_str_radix(group, 16).ok()?;
    }

    Some(MacAddr::new(
        octets[0], octets[1], octets[2], octets[3], octets[4], octets[5],
    ))
}

/// Normalized form: uppercase hex, colon-delimited.
pub fn format_mac(mac: &MacAddr) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac.0, mac.1, mac.2, mac.3, mac.4, mac.5
    )
}

/// The all-zero address some tables report for incomplete entries.
pub fn is_zero(mac: &MacAddr) -> bool {
    *mac == MacAddr::zero()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
