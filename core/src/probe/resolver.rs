use std::net::Ipv4Addr;
use std::time::Duration;

use sweepr_common::debug;
use sweepr_common::network::host::Resolution;
use sweepr_common::network::mac;
use sweepr_common::probe::NeighborSource;

/// Time a table query gets on top of the probe timeout to start and exit.
const TABLE_GRACE: Duration = Duration::from_millis(1_500);

/// Ordered chain of neighbor sources; the first usable entry wins.
pub struct MacResolver {
    tables: Vec<Box<dyn NeighborSource>>,
}

impl MacResolver {
    pub fn new(tables: Vec<Box<dyn NeighborSource>>) -> Self {
        Self { tables }
    }

    /// Each source gets `timeout` plus a short grace period. A source that overruns is
    /// dropped, which also kills any utility it spawned, and the next one is asked.
    pub async fn resolve(&self, address: Ipv4Addr, timeout: Duration) -> Resolution {
        let budget = timeout + TABLE_GRACE;
        for table in &self.tables {
            match tokio::time::timeout(budget, table.lookup(address)).await {
                Ok(Ok(Some(entry))) if !mac::is_zero(&entry.mac) => {
                    debug!("{address}: resolved through the {}", table.name());
                    return entry.into();
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => debug!("{address}: {} lookup failed: {e:#}", table.name()),
                Err(_elapsed) => {
                    debug!("{address}: {} lookup timed out after {budget:?}", table.name())
                }
            }
        }
        Resolution::Unresolved
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
