//! **HostProbe**: liveness check followed by link-layer resolution for one address.
//!
//! Liveness tries ICMP echo first and falls back to the ping utility when the echo
//! transport cannot be used. Only hosts that answered are handed to the
//! [`MacResolver`], whose outcome is a [`Resolution`] rather than an error: a live
//! host without a resolvable MAC is reported as `Unknown` / `Reachable`.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

use sweepr_common::debug;
use sweepr_common::network::host::{ProbeResult, Resolution};
use sweepr_common::probe::{EchoProbe, NeighborSource, Prober};

use crate::network::{arp::ArpCache, icmp::IcmpEcho, neighbor::NeighborTable, ping::PingUtility};

mod resolver;

pub use resolver::MacResolver;

pub struct HostProber {
    primary: Box<dyn EchoProbe>,
    fallback: Box<dyn EchoProbe>,
    resolver: MacResolver,
}

impl HostProber {
    pub fn new(
        primary: Box<dyn EchoProbe>,
        fallback: Box<dyn EchoProbe>,
        tables: Vec<Box<dyn NeighborSource>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            resolver: MacResolver::new(tables),
        }
    }

    /// ICMP echo, then the ping utility, then the neighbor table and the ARP cache.
    pub fn system() -> Self {
        Self::new(
            Box::new(IcmpEcho::new()),
            Box::new(PingUtility),
            vec![Box::new(NeighborTable), Box::new(ArpCache)],
        )
    }

    pub async fn is_alive(&self, address: Ipv4Addr, timeout: Duration) -> bool {
        match self.primary.echo(address, timeout).await {
            Ok(alive) => alive,
            Err(e) => {
                debug!("{address}: echo transport failed ({e}), trying fallback");
                self.fallback
                    .echo(address, timeout)
                    .await
                    .unwrap_or_else(|e| {
                        debug!("{address}: fallback echo failed ({e})");
                        false
                    })
            }
        }
    }

    pub async fn resolve(&self, address: Ipv4Addr, timeout: Duration) -> Resolution {
        self.resolver.resolve(address, timeout).await
    }
}

#[async_trait]
impl Prober for HostProber {
    async fn probe(&self, address: Ipv4Addr, timeout: Duration) -> ProbeResult {
        if !self.is_alive(address, timeout).await {
            return ProbeResult::offline(address);
        }
        ProbeResult::online(address, self.resolve(address, timeout).await)
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
