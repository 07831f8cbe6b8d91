#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::config::Config;
use sweepr_common::error::{ProbeError, SweepError};
use sweepr_common::network::address;
use sweepr_common::network::host::{LinkLayer, ProbeResult, ResolutionState};
use sweepr_common::network::range::parse_cidr;
use sweepr_common::probe::{EchoProbe, NeighborEntry, NeighborSource, Prober};
use sweepr_core::discovery::DiscoveryService;
use sweepr_core::probe::HostProber;
use sweepr_core::scanner::ScanScheduler;
use tokio_util::sync::CancellationToken;

use crate::mock::mac;

/// Answers for .1 to .3 only.
struct LowHostsEcho;

#[async_trait]
impl EchoProbe for LowHostsEcho {
    async fn echo(&self, address: Ipv4Addr, _timeout: Duration) -> Result<bool, ProbeError> {
        Ok(address.octets()[3] <= 3)
    }
}

struct NoIcmp;

#[async_trait]
impl EchoProbe for NoIcmp {
    async fn echo(&self, _address: Ipv4Addr, _timeout: Duration) -> Result<bool, ProbeError> {
        Err(ProbeError::TransportUnavailable(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        )))
    }
}

/// Knows the MAC of .1 only.
struct GatewayOnlyTable;

#[async_trait]
impl NeighborSource for GatewayOnlyTable {
    fn name(&self) -> &'static str {
        "gateway table"
    }

    async fn lookup(&self, address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        Ok((address.octets()[3] == 1).then(|| NeighborEntry {
            mac: mac(0x01),
            state: ResolutionState::Reachable,
        }))
    }
}

struct EmptyTable;

#[async_trait]
impl NeighborSource for EmptyTable {
    fn name(&self) -> &'static str {
        "empty table"
    }

    async fn lookup(&self, _address: Ipv4Addr) -> anyhow::Result<Option<NeighborEntry>> {
        Ok(None)
    }
}

#[test]
fn slash_24_scenario() {
    let range = parse_cidr("192.168.1.0/24").unwrap();
    assert_eq!(address::from_u32(range.first_usable.into()), "192.168.1.1");
    assert_eq!(address::from_u32(range.last_usable.into()), "192.168.1.254");
    assert_eq!(range.total_hosts, 254);
}

#[test]
fn slash_30_scenario() {
    let range = parse_cidr("10.0.0.0/30").unwrap();
    assert_eq!(range.total_hosts, 2);
    assert_eq!(range.first_usable, Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(range.last_usable, Ipv4Addr::new(10, 0, 0, 2));
}

#[test]
fn bad_octet_is_malformed_input() {
    let err = parse_cidr("999.1.1.0/24").unwrap_err();
    assert!(matches!(err, SweepError::MalformedInput { .. }), "{err:?}");
}

#[tokio::test]
async fn responsive_host_without_table_entry_reports_unknown_mac() {
    let prober = HostProber::new(
        Box::new(LowHostsEcho),
        Box::new(NoIcmp),
        vec![Box::new(EmptyTable), Box::new(EmptyTable)],
    );

    let result = prober
        .probe(Ipv4Addr::new(10, 60, 0, 2), Duration::from_millis(500))
        .await;

    assert_eq!(
        result,
        ProbeResult {
            address: Ipv4Addr::new(10, 60, 0, 2),
            is_online: true,
            link_layer: LinkLayer::Unknown,
            state: ResolutionState::Reachable,
        }
    );
    assert_eq!(result.link_layer.to_string(), "Unknown");
}

#[tokio::test]
async fn end_to_end_discovery_over_mock_transports() -> anyhow::Result<()> {
    let range = parse_cidr("10.60.0.0/28")?;
    let prober = HostProber::new(
        Box::new(NoIcmp),
        Box::new(LowHostsEcho),
        vec![Box::new(EmptyTable), Box::new(GatewayOnlyTable)],
    );
    let service = DiscoveryService::new(ScanScheduler::new(Arc::new(prober)), None);
    let cfg = Config::builder().timeout_ms(200).concurrency(4).build()?;

    let report = service
        .perform_discovery(&range, &cfg, &CancellationToken::new())
        .await;

    assert_eq!(report.scanned, 14);
    let hosts: Vec<(Ipv4Addr, String, ResolutionState)> = report
        .hosts
        .iter()
        .map(|h| (h.address, h.link_layer.to_string(), h.state))
        .collect();
    assert_eq!(
        hosts,
        vec![
            (Ipv4Addr::new(10, 60, 0, 1), "00:1B:21:0A:0B:01".to_string(), ResolutionState::Reachable),
            (Ipv4Addr::new(10, 60, 0, 2), "Unknown".to_string(), ResolutionState::Reachable),
            (Ipv4Addr::new(10, 60, 0, 3), "Unknown".to_string(), ResolutionState::Reachable),
        ]
    );
    Ok(())
}

/// Uses the real ICMP / ping / neighbor table stack against the loopback interface.
#[tokio::test]
#[ignore = "needs a working ping utility or raw socket privileges"]
async fn loopback_answers_through_the_system_prober() {
    let result = HostProber::system()
        .probe(Ipv4Addr::LOCALHOST, Duration::from_millis(1000))
        .await;
    assert!(result.is_online);
}
