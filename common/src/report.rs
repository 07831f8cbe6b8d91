//! Turns the raw probe results of a scan into the report shown to the user.

use std::fmt;
use std::time::Duration;

use crate::network::host::{Host, ProbeResult};

/// Which execution path produced the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Concurrent,
    Sequential,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concurrent => f.write_str("concurrent"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

/// The responsive hosts of one scan, in address order, plus scan metadata.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub hosts: Vec<Host>,
    /// Number of addresses that produced a result.
    pub scanned: usize,
    pub duration: Duration,
    pub mode: ScanMode,
    /// The scan was stopped early; `scanned` may be short of the range size.
    pub cancelled: bool,
}

impl ScanReport {
    pub fn aggregate(
        results: &[ProbeResult],
        duration: Duration,
        mode: ScanMode,
        cancelled: bool,
    ) -> Self {
        Self {
            hosts: aggregate(results),
            scanned: results.len(),
            duration,
            mode,
            cancelled,
        }
    }

    pub fn online(&self) -> usize {
        self.hosts.len()
    }
}

/// Keeps only the hosts that answered, ordered by address.
pub fn aggregate(results: &[ProbeResult]) -> Vec<Host> {
    let mut hosts: Vec<Host> = results
        .iter()
        .filter(|result| result.is_online)
        .map(Host::from)
        .collect();
    hosts.sort_by_key(|host| host.address);
    hosts
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
