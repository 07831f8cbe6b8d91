//! Lookups in the ARP cache.
//!
//! On Linux `/proc/net/arp` is read directly; every other platform, and Linux
//! without procfs, asks the `arp` utility. The output formats differ wildly:
//!
//! ```text
//! 10.10.0.1        0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
//! ? (10.10.0.1) at aa:bb:cc:dd:ee:ff [ether] on eth0
//!   10.10.0.1             aa-bb-cc-dd-ee-ff     dynamic
//! ```
//!
//! so parsing only relies on a line holding the target address as a whole token
//! and a MAC-shaped token.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use pnet::util::MacAddr;

#[cfg(target_os = "linux")]
use sweepr_common::debug;
use sweepr_common::network::host::ResolutionState;
use sweepr_common::network::mac;
use sweepr_common::probe::{NeighborEntry, NeighborSource};

#[cfg(target_os = "linux")]
const PROC_ARP: &str = "/proc/net/arp";

pub struct ArpCache;

#[async_trait]
impl NeighborSource for ArpCache {
    fn name(&self) -> &'static str {
        "ARP cache"
    }

    async fn lookup(&self, address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        let table = read_table(address).await?;
        Ok(find_mac(&table, address).map(|mac| NeighborEntry {
            mac,
            state: ResolutionState::Reachable,
        }))
    }
}

#[cfg(target_os = "linux")]
async fn read_table(address: Ipv4Addr) -> anyhow::Result<String> {
    match tokio::fs::read_to_string(PROC_ARP).await {
        Ok(content) => Ok(content),
        Err(e) => {
            debug!("{PROC_ARP} not readable ({e}), asking the arp utility");
            super::query_table("arp", &["-an", &address.to_string()]).await
        }
    }
}

#[cfg(target_os = "windows")]
async fn read_table(address: Ipv4Addr) -> anyhow::Result<String> {
    super::query_table("arp", &["-a", &address.to_string()]).await
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
async fn read_table(address: Ipv4Addr) -> anyhow::Result<String> {
    super::query_table("arp", &["-n", &address.to_string()]).await
}

/// Finds the MAC listed for `address`, skipping incomplete and all-zero entries.
pub fn find_mac(table: &str, address: Ipv4Addr) -> Option<MacAddr> {
    let target = address.to_string();
    table
        .lines()
        .filter(|line| {
            line.split_whitespace()
                .any(|token| token.trim_matches(|c| c == '(' || c == ')') == target)
        })
        .find_map(|line| {
            line.split_whitespace()
                .filter_map(mac::parse_mac)
                .find(|mac| !mac::is_zero(mac))
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
