//! The boundaries a host probe is built from.
//!
//! `sweepr-core` provides the real implementations (ICMP over raw sockets, the ping
//! utility, `ip neigh`, the ARP cache). Tests swap in their own.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use crate::error::ProbeError;
use crate::network::host::{ProbeResult, Resolution, ResolutionState};

/// Determines liveness and link-layer address of a single host.
///
/// Implementations never fail: every problem ends up in the returned [`ProbeResult`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: Ipv4Addr, timeout: Duration) -> ProbeResult;
}

/// One way of asking "is this host up?".
#[async_trait]
pub trait EchoProbe: Send + Sync {
    /// `Ok(false)` means the host stayed silent within `timeout`;
    /// `Err` means this transport could not answer the question.
    async fn echo(&self, address: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError>;
}

/// An OS table mapping IPv4 addresses to link-layer addresses.
#[async_trait]
pub trait NeighborSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the table has no usable entry for `address`.
    async fn lookup(&self, address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborEntry {
    pub mac: MacAddr,
    pub state: ResolutionState,
}

impl From<NeighborEntry> for Resolution {
    fn from(entry: NeighborEntry) -> Self {
        Resolution::Resolved {
            mac: entry.mac,
            state: entry.state,
        }
    }
}
