//! Adapters to the operating system's network facilities.
//!
//! * [`icmp`]: ICMP echo over a raw pnet transport channel (needs root).
//! * [`ping`]: the platform `ping` utility, used when raw sockets are unavailable.
//! * [`neighbor`]: the kernel neighbor table (`ip neigh`, `Get-NetNeighbor`).
//! * [`arp`]: the ARP cache (`/proc/net/arp`, `arp -a`).

use std::process::Stdio;

use anyhow::{Context, ensure};
use tokio::process::Command;

pub mod arp;
pub mod icmp;
pub mod neighbor;
pub mod ping;

/// Runs a table-query utility and returns its stdout.
pub(crate) async fn query_table(program: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("running {program}"))?;

    ensure!(output.status.success(), "{program} exited with {}", output.status);
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
