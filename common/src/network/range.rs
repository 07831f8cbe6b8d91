//! CIDR decomposition and host enumeration.

use std::fmt;
use std::iter::Map;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::SweepError;
use crate::network::address;

/// A parsed CIDR block together with its usable host range.
///
/// `/31` blocks are point-to-point links (RFC 3021) where both addresses are usable,
/// and `/32` is a single host. Every other prefix excludes the network and broadcast
/// addresses, so `total_hosts = 2^(32 - prefix) - 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRange {
    /// The address part exactly as it was given.
    pub base_address: String,
    pub network: Ipv4Addr,
    pub prefix: u8,
    pub first_usable: Ipv4Addr,
    pub last_usable: Ipv4Addr,
    pub total_hosts: u64,
}

impl NetworkRange {
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !netmask(self.prefix))
    }

    /// The usable host addresses, produced lazily.
    pub fn hosts(&self) -> AddressRange {
        AddressRange {
            first: self.first_usable.into(),
            last: self.last_usable.into(),
        }
    }
}

impl FromStr for NetworkRange {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

/// Parses `a.b.c.d/p` into a [`NetworkRange`].
pub fn parse_cidr(text: &str) -> Result<NetworkRange, SweepError> {
    let Some((ip_str, prefix_str)) = text.split_once('/') else {
        return Err(SweepError::MalformedInput {
            token: text.to_string(),
            reason: "expected CIDR notation 'address/prefix'".to_string(),
        });
    };

    let ip: u32 = address::to_u32(ip_str)?;
    let prefix: u8 = parse_prefix(prefix_str)?;

    let mask: u32 = netmask(prefix);
    let network: u32 = ip & mask;
    let broadcast: u32 = network | !mask;

    let (first, last, total_hosts) = match prefix {
        32 => (network, network, 1),
        31 => (network, broadcast, 2),
        _ => (network + 1, broadcast - 1, (1u64 << (32 - prefix)) - 2),
    };

    Ok(NetworkRange {
        base_address: ip_str.to_string(),
        network: Ipv4Addr::from(network),
        prefix,
        first_usable: Ipv4Addr::from(first),
        last_usable: Ipv4Addr::from(last),
        total_hosts,
    })
}

fn parse_prefix(token: &str) -> Result<u8, SweepError> {
    let malformed = |reason: &str| SweepError::MalformedInput {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("prefix must be a number between 0 and 32"));
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err(malformed("prefix has a leading zero"));
    }

    let prefix: u8 = token
        .parse()
        .map_err(|_| malformed("prefix must be a number between 0 and 32"))?;
    if prefix > 32 {
        return Err(malformed("prefix must be a number between 0 and 32"));
    }
    Ok(prefix)
}

fn netmask(prefix: u8) -> u32 {
    u32::MAX.checked_shl(32 - prefix as u32).unwrap_or(0)
}

/// An inclusive, re-enumerable run of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    first: u32,
    last: u32,
}

/// Validates `first <= last` and returns the addresses between them.
pub fn enumerate(first: Ipv4Addr, last: Ipv4Addr) -> Result<AddressRange, SweepError> {
    if u32::from(last) < u32::from(first) {
        return Err(SweepError::InvalidRange { first, last });
    }
    Ok(AddressRange {
        first: first.into(),
        last: last.into(),
    })
}

impl AddressRange {
    pub fn first(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.first)
    }

    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last)
    }

    pub fn len(&self) -> u64 {
        u64::from(self.last - self.first) + 1
    }

    // An AddressRange always holds at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> AddressIter {
        (*self).into_iter()
    }
}

pub type AddressIter = Map<RangeInclusive<u32>, fn(u32) -> Ipv4Addr>;

impl IntoIterator for AddressRange {
    type Item = Ipv4Addr;
    type IntoIter = AddressIter;

    fn into_iter(self) -> Self::IntoIter {
        (self.first..=self.last).map(Ipv4Addr::from as fn(u32) -> Ipv4Addr)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
