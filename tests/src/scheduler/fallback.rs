#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use sweepr_common::network::host::{Resolution, ResolutionState};
use sweepr_common::network::range::parse_cidr;
use sweepr_common::report::ScanMode;
use sweepr_core::scanner::{ScanOptions, ScanScheduler, SchedulerState, TokioPool};
use tokio_util::sync::CancellationToken;

use crate::mock::{FailingPool, MockNetwork, UnavailablePool, mac, sorted};

const OPTIONS: ScanOptions = ScanOptions {
    timeout: Duration::from_millis(100),
    concurrency: 16,
    sequential: false,
};

fn lab() -> MockNetwork {
    MockNetwork::new()
        .with_host(
            Ipv4Addr::new(10, 40, 0, 1),
            Resolution::Resolved { mac: mac(1), state: ResolutionState::Reachable },
        )
        .with_host(
            Ipv4Addr::new(10, 40, 0, 17),
            Resolution::Resolved { mac: mac(17), state: ResolutionState::Unknown },
        )
        .with_host(Ipv4Addr::new(10, 40, 0, 33), Resolution::Unresolved)
}

#[tokio::test]
async fn failed_substrate_matches_the_concurrent_result() {
    let range = parse_cidr("10.40.0.0/26").unwrap();
    let cancel = CancellationToken::new();

    let concurrent = ScanScheduler::new(Arc::new(lab()))
        .collect(range.hosts(), &OPTIONS, &cancel)
        .await;

    let network = Arc::new(lab());
    let degraded = ScanScheduler::with_pool(network.clone(), Box::new(FailingPool { after: 9 }))
        .collect(range.hosts(), &OPTIONS, &cancel)
        .await;

    assert_eq!(concurrent.mode, ScanMode::Concurrent);
    assert_eq!(degraded.mode, ScanMode::Sequential);
    assert_eq!(degraded.results.len(), 62);
    assert_eq!(sorted(degraded.results), sorted(concurrent.results));
    // The first nine were probed by the dead pool and again by the rescan.
    assert_eq!(network.calls(Ipv4Addr::new(10, 40, 0, 1)), 2);
    assert_eq!(network.calls(Ipv4Addr::new(10, 40, 0, 10)), 1);
}

#[tokio::test]
async fn pool_that_cannot_start_degrades_to_sequential() {
    let range = parse_cidr("10.40.0.0/28").unwrap();
    let scheduler = ScanScheduler::with_pool(Arc::new(lab()), Box::new(UnavailablePool));

    let report = scheduler
        .scan(range.hosts(), &OPTIONS, &CancellationToken::new())
        .await;

    assert_eq!(report.mode, ScanMode::Sequential);
    assert_eq!(report.scanned, 14);
    assert_eq!(report.online(), 1);
    assert_eq!(scheduler.state(), SchedulerState::Complete);
}

#[tokio::test]
async fn zero_limit_is_refused_by_the_pool_and_recovered() {
    let range = parse_cidr("10.40.0.0/29").unwrap();
    let scheduler = ScanScheduler::with_pool(Arc::new(lab()), Box::new(TokioPool));
    let options = ScanOptions { concurrency: 0, ..OPTIONS };

    let outcome = scheduler
        .collect(range.hosts(), &options, &CancellationToken::new())
        .await;

    assert_eq!(outcome.mode, ScanMode::Sequential);
    assert_eq!(outcome.results.len(), 6);
}

#[tokio::test]
async fn crashed_worker_triggers_a_clean_rescan() {
    let range = parse_cidr("10.40.0.0/26").unwrap();
    let network = Arc::new(lab().panicking_once_on(Ipv4Addr::new(10, 40, 0, 5)));
    let scheduler = ScanScheduler::new(network.clone());

    let outcome = scheduler
        .collect(range.hosts(), &OPTIONS, &CancellationToken::new())
        .await;

    assert_eq!(outcome.mode, ScanMode::Sequential);
    let results = sorted(outcome.results);
    assert_eq!(results.len(), 62);
    results
        .windows(2)
        .for_each(|pair| assert!(pair[0].address < pair[1].address));
    assert_eq!(results.iter().filter(|r| r.is_online).count(), 3);
}
