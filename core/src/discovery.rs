//! # Network Discovery Service
//!
//! Implements the "sweep a subnet" use case: probe every usable address of a range,
//! keep the hosts that answered, and enrich them with vendor names.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use sweepr_common::config::Config;
use sweepr_common::network::host::Host;
use sweepr_common::network::range::NetworkRange;
use sweepr_common::report::ScanReport;
use sweepr_common::vendors::VendorRepository;
use sweepr_common::{info, success};

use crate::probe::HostProber;
use crate::scanner::{ScanOptions, ScanProgress, ScanScheduler};
use crate::vendors::MacOuiRepo;

/// Application service for network discovery.
///
/// Orchestrates the discovery process by:
/// 1. delegating the probing of each address to the [`ScanScheduler`].
/// 2. enriching the responsive hosts with vendor data, when enabled.
pub struct DiscoveryService {
    scheduler: ScanScheduler,
    vendor_repo: Option<Box<dyn VendorRepository>>,
}

impl DiscoveryService {
    pub fn new(scheduler: ScanScheduler, vendor_repo: Option<Box<dyn VendorRepository>>) -> Self {
        Self {
            scheduler,
            vendor_repo,
        }
    }

    /// Wires the OS-backed prober and, unless disabled, the OUI vendor database.
    pub fn system(cfg: &Config) -> Self {
        let scheduler = ScanScheduler::new(Arc::new(HostProber::system()));
        let vendor_repo: Option<Box<dyn VendorRepository>> = if cfg.resolve_vendors {
            Some(Box::new(MacOuiRepo))
        } else {
            None
        };
        Self::new(scheduler, vendor_repo)
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ScanProgress) + Send + Sync + 'static,
    {
        self.scheduler = self.scheduler.on_progress(callback);
        self
    }

    pub async fn perform_discovery(
        &self,
        range: &NetworkRange,
        cfg: &Config,
        cancel: &CancellationToken,
    ) -> ScanReport {
        let hosts = range.hosts();
        info!(
            "Probing {} addresses from {} to {}",
            hosts.len(),
            hosts.first(),
            hosts.last()
        );

        let mut report = self.scheduler.scan(hosts, &ScanOptions::from(cfg), cancel).await;
        self.enrich_vendors(&mut report.hosts);

        let online = report.online();
        let unit = if online == 1 { "host is" } else { "hosts are" };
        success!("{online} {unit} up");
        report
    }

    fn enrich_vendors(&self, hosts: &mut [Host]) {
        let Some(repo) = &self.vendor_repo else {
            return;
        };
        for host in hosts.iter_mut() {
            if let Some(mac) = host.link_layer.mac() {
                host.vendor = repo.get_vendor(mac);
            }
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
