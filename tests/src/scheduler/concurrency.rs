#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use sweepr_common::network::range::parse_cidr;
use sweepr_core::scanner::{ScanOptions, ScanScheduler};
use tokio_util::sync::CancellationToken;

use crate::mock::MockNetwork;

async fn peak_for(limit: usize) -> usize {
    let range = parse_cidr("10.30.0.0/26").unwrap();
    let network = Arc::new(MockNetwork::new().with_delay(Duration::from_millis(3)));
    let scheduler = ScanScheduler::new(network.clone());
    let options = ScanOptions {
        timeout: Duration::from_millis(100),
        concurrency: limit,
        sequential: false,
    };

    let outcome = scheduler
        .collect(range.hosts(), &options, &CancellationToken::new())
        .await;
    assert_eq!(outcome.results.len(), 62);
    network.peak()
}

#[tokio::test]
async fn in_flight_probes_never_exceed_the_limit() {
    for limit in [1, 3, 10, 25] {
        let peak = peak_for(limit).await;
        assert!(peak <= limit, "limit {limit}, observed {peak}");
        assert!(peak >= 1);
    }
}

#[tokio::test]
async fn probes_actually_overlap() {
    assert!(peak_for(10).await > 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn limit_holds_on_a_multi_threaded_runtime() {
    let peak = peak_for(8).await;
    assert!(peak <= 8, "observed {peak}");
}

#[tokio::test]
async fn sequential_mode_runs_one_at_a_time() {
    let range = parse_cidr("10.30.0.0/28").unwrap();
    let network = Arc::new(MockNetwork::new().with_delay(Duration::from_millis(1)));
    let scheduler = ScanScheduler::new(network.clone());
    let options = ScanOptions {
        timeout: Duration::from_millis(100),
        concurrency: 100,
        sequential: true,
    };

    scheduler
        .collect(range.hosts(), &options, &CancellationToken::new())
        .await;

    assert_eq!(network.peak(), 1);
}
