#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

use sweepr_common::network::range::{enumerate, parse_cidr};
use sweepr_common::report::ScanMode;
use sweepr_core::scanner::{ScanOptions, ScanScheduler, SchedulerState};
use tokio_util::sync::CancellationToken;

use crate::mock::{MockNetwork, sorted};

fn options(concurrency: usize) -> ScanOptions {
    ScanOptions {
        timeout: std::time::Duration::from_millis(100),
        concurrency,
        sequential: false,
    }
}

#[tokio::test]
async fn every_address_exactly_once() {
    let range = parse_cidr("10.20.0.0/22").unwrap();
    let network = Arc::new(MockNetwork::new().with_every(range.first_usable, 1022, 7));
    let scheduler = ScanScheduler::new(network.clone());

    let outcome = scheduler
        .collect(range.hosts(), &options(100), &CancellationToken::new())
        .await;

    assert_eq!(outcome.mode, ScanMode::Concurrent);
    assert_eq!(outcome.results.len(), 1022);
    let distinct: HashSet<Ipv4Addr> = outcome.results.iter().map(|r| r.address).collect();
    assert_eq!(distinct.len(), 1022);
    assert!(range.hosts().iter().all(|a| distinct.contains(&a)));
    assert_eq!(network.total_calls(), 1022);
    assert_eq!(scheduler.state(), SchedulerState::Complete);
}

#[tokio::test]
async fn completeness_holds_for_any_limit() {
    let addresses = enumerate(Ipv4Addr::new(192, 168, 7, 1), Ipv4Addr::new(192, 168, 7, 77)).unwrap();

    for limit in [1, 2, 5, 76, 77, 500] {
        let network = Arc::new(MockNetwork::new());
        let scheduler = ScanScheduler::new(network.clone());

        let outcome = scheduler
            .collect(addresses, &options(limit), &CancellationToken::new())
            .await;

        let results = sorted(outcome.results);
        let seen: Vec<Ipv4Addr> = results.iter().map(|r| r.address).collect();
        let expected: Vec<Ipv4Addr> = addresses.iter().collect();
        assert_eq!(seen, expected, "limit {limit}");
        assert!(addresses.iter().all(|a| network.calls(a) == 1));
    }
}

#[tokio::test]
async fn report_holds_only_online_hosts_in_address_order() {
    let range = parse_cidr("172.20.1.0/24").unwrap();
    let network = Arc::new(MockNetwork::new().with_every(range.first_usable, 254, 50));
    let scheduler = ScanScheduler::new(network);

    let report = scheduler
        .scan(range.hosts(), &options(32), &CancellationToken::new())
        .await;

    assert_eq!(report.scanned, 254);
    let online: Vec<u8> = report.hosts.iter().map(|h| h.address.octets()[3]).collect();
    assert_eq!(online, vec![50, 100, 150, 200, 250]);
    assert!(!report.cancelled);
}

#[tokio::test]
async fn single_host_network() {
    let range = parse_cidr("10.9.9.9/32").unwrap();
    let network = Arc::new(MockNetwork::new().with_every(range.first_usable, 1, 1));
    let scheduler = ScanScheduler::new(network);

    let report = scheduler
        .scan(range.hosts(), &options(100), &CancellationToken::new())
        .await;

    assert_eq!(report.scanned, 1);
    assert_eq!(report.hosts.len(), 1);
    assert_eq!(report.hosts[0].address, Ipv4Addr::new(10, 9, 9, 9));
}
