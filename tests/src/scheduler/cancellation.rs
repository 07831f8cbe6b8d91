#![cfg(test)]
use std::sync::Arc;
use std::time::{Duration, Instant};

use sweepr_common::network::range::parse_cidr;
use sweepr_core::scanner::{ScanOptions, ScanScheduler};
use tokio_util::sync::CancellationToken;

use crate::mock::MockNetwork;

const SLOW: Duration = Duration::from_secs(30);

fn cancel_after(delay: Duration) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        trigger.cancel();
    });
    cancel
}

async fn scan_slow_network(sequential: bool) {
    let range = parse_cidr("10.50.0.0/24").unwrap();
    let scheduler = ScanScheduler::new(Arc::new(MockNetwork::new().with_delay(SLOW)));
    let options = ScanOptions {
        timeout: Duration::from_millis(100),
        concurrency: 8,
        sequential,
    };
    let cancel = cancel_after(Duration::from_millis(50));
    let started = Instant::now();

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        scheduler.scan(range.hosts(), &options, &cancel),
    )
    .await
    .expect("outstanding probes were awaited instead of abandoned");

    assert!(report.cancelled);
    assert_eq!(report.scanned, 0);
    assert!(started.elapsed() < SLOW);
}

#[tokio::test]
async fn concurrent_scan_abandons_outstanding_probes() {
    scan_slow_network(false).await;
}

#[tokio::test]
async fn sequential_scan_abandons_the_probe_in_flight() {
    scan_slow_network(true).await;
}

#[tokio::test]
async fn partial_results_survive_cancellation() {
    let range = parse_cidr("10.50.0.0/24").unwrap();
    let scheduler = ScanScheduler::new(Arc::new(
        MockNetwork::new()
            .with_every(range.first_usable, 254, 1)
            .with_delay(Duration::from_millis(20)),
    ));
    let options = ScanOptions {
        timeout: Duration::from_millis(100),
        concurrency: 1,
        sequential: false,
    };
    let cancel = cancel_after(Duration::from_millis(150));

    let report = scheduler.scan(range.hosts(), &options, &cancel).await;

    assert!(report.cancelled);
    assert!(report.scanned > 0 && report.scanned < 254, "scanned {}", report.scanned);
    assert_eq!(report.online(), report.scanned);
}
