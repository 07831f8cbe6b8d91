//! Lookups in the kernel neighbor table.
//!
//! Linux is queried through `ip -4 neigh show <addr>`, Windows through
//! `Get-NetNeighbor`. Elsewhere the table is treated as empty and resolution
//! moves on to the ARP cache.

use std::net::Ipv4Addr;

use async_trait::async_trait;

use sweepr_common::network::host::ResolutionState;
use sweepr_common::network::mac;
use sweepr_common::probe::{NeighborEntry, NeighborSource};

pub struct NeighborTable;

#[async_trait]
impl NeighborSource for NeighborTable {
    fn name(&self) -> &'static str {
        "neighbor table"
    }

    #[cfg(target_os = "linux")]
    async fn lookup(&self, address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        let target = address.to_string();
        let output = super::query_table("ip", &["-4", "neigh", "show", &target]).await?;
        Ok(parse_ip_neigh(&output, address))
    }

    #[cfg(target_os = "windows")]
    async fn lookup(&self, address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        let script = format!(
            "Get-NetNeighbor -AddressFamily IPv4 -IPAddress {address} -ErrorAction SilentlyContinue \
             | ForEach-Object {{ \"$($_.LinkLayerAddress) $($_.State)\" }}"
        );
        let output = super::query_table("powershell", &["-NoProfile", "-Command", &script]).await?;
        Ok(parse_net_neighbor(&output))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    async fn lookup(&self, _address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        Ok(None)
    }
}

/// Parses `ip neigh` output such as
/// `192.168.1.1 dev eth0 lladdr aa:bb:cc:dd:ee:ff REACHABLE`.
pub fn parse_ip_neigh(output: &str, address: Ipv4Addr) -> Option<NeighborEntry> {
    let target = address.to_string();
    output.lines().find_map(|line| {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&target.as_str()) {
            return None;
        }
        let lladdr = tokens.iter().position(|t| *t == "lladdr")?;
        let mac = mac::parse_mac(tokens.get(lladdr + 1)?)?;
        let state = neighbor_state(tokens.last()?)?;
        entry(mac, state)
    })
}

/// Parses `<LinkLayerAddress> <State>` lines produced by `Get-NetNeighbor`.
pub fn parse_net_neighbor(output: &str) -> Option<NeighborEntry> {
    output.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        let mac = mac::parse_mac(tokens.next()?)?;
        let state = neighbor_state(tokens.next()?)?;
        entry(mac, state)
    })
}

/// Maps a neighbor-table state; `None` for entries that hold no usable address.
fn neighbor_state(state: &str) -> Option<ResolutionState> {
    match state.to_ascii_uppercase().as_str() {
        "REACHABLE" | "PERMANENT" | "NOARP" => Some(ResolutionState::Reachable),
        "FAILED" | "INCOMPLETE" | "UNREACHABLE" | "NONE" => None,
        _ => Some(ResolutionState::Unknown),
    }
}

fn entry(mac: pnet::util::MacAddr, state: ResolutionState) -> Option<NeighborEntry> {
    if mac::is_zero(&mac) {
        return None;
    }
    Some(NeighborEntry { mac, state })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
