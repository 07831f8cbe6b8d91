use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::network::mac;

/// Text shown for a live host whose MAC could not be resolved.
pub const UNKNOWN_MAC: &str = "Unknown";

/// Reachability as reported by the probe and the neighbor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    Reachable,
    Unreachable,
    Unknown,
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Reachable => "Reachable",
            Self::Unreachable => "Unreachable",
            Self::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// Outcome of the MAC resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Resolved { mac: MacAddr, state: ResolutionState },
    Unresolved,
}

/// The link-layer address carried by a probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkLayer {
    Known(MacAddr),
    Unknown,
}

impl LinkLayer {
    pub fn mac(&self) -> Option<MacAddr> {
        match self {
            Self::Known(mac) => Some(*mac),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for LinkLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(mac) => f.write_str(&mac::format_mac(mac)),
            Self::Unknown => f.write_str(UNKNOWN_MAC),
        }
    }
}

/// What a single probe learned about one address. Never modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeResult {
    pub address: Ipv4Addr,
    pub is_online: bool,
    pub link_layer: LinkLayer,
    pub state: ResolutionState,
}

impl ProbeResult {
    /// A host that did not answer the liveness check.
    pub fn offline(address: Ipv4Addr) -> Self {
        Self {
            address,
            is_online: false,
            link_layer: LinkLayer::Unknown,
            state: ResolutionState::Unreachable,
        }
    }

    /// A host that answered, with whatever the resolution chain found.
    pub fn online(address: Ipv4Addr, resolution: Resolution) -> Self {
        let (link_layer, state) = match resolution {
            Resolution::Resolved { mac, state } => (LinkLayer::Known(mac), state),
            Resolution::Unresolved => (LinkLayer::Unknown, ResolutionState::Reachable),
        };
        Self {
            address,
            is_online: true,
            link_layer,
            state,
        }
    }
}

/// A responsive host as presented in the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub address: Ipv4Addr,
    pub link_layer: LinkLayer,
    pub state: ResolutionState,
    pub vendor: Option<String>,
}

impl From<&ProbeResult> for Host {
    fn from(result: &ProbeResult) -> Self {
        Self {
            address: result.address,
            link_layer: result.link_layer,
            state: result.state,
            vendor: None,
        }
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
