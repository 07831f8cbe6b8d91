use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use sweepr_common::error::SchedulerError;
use sweepr_common::network::host::{ProbeResult, Resolution};
use sweepr_common::probe::Prober;
use sweepr_core::scanner::{ScanContext, ScanJob, WorkerPool};

/// A scripted network: listed hosts answer, everything else is silent.
#[derive(Default)]
pub struct MockNetwork {
    online: HashMap<Ipv4Addr, Resolution>,
    delay: Duration,
    panic_once_on: Option<Ipv4Addr>,
    tripped: AtomicBool,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<HashMap<Ipv4Addr, usize>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, address: Ipv4Addr, resolution: Resolution) -> Self {
        self.online.insert(address, resolution);
        self
    }

    /// Of `count` addresses from `first`, those whose last octet is a multiple of
    /// `step` answer, unresolved.
    pub fn with_every(mut self, first: Ipv4Addr, count: u32, step: u8) -> Self {
        let base = u32::from(first);
        for address in (base..base + count).map(Ipv4Addr::from) {
            if address.octets()[3] % step == 0 {
                self.online.insert(address, Resolution::Unresolved);
            }
        }
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The first probe of `address` panics; later ones behave normally.
    pub fn panicking_once_on(mut self, address: Ipv4Addr) -> Self {
        self.panic_once_on = Some(address);
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self, address: Ipv4Addr) -> usize {
        self.calls.lock().unwrap().get(&address).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Prober for MockNetwork {
    async fn probe(&self, address: Ipv4Addr, _timeout: Duration) -> ProbeResult {
        *self.calls.lock().unwrap().entry(address).or_default() += 1;

        if self.panic_once_on == Some(address) && !self.tripped.swap(true, Ordering::SeqCst) {
            panic!("simulated worker crash on {address}");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.online.get(&address) {
            Some(resolution) => ProbeResult::online(address, *resolution),
            None => ProbeResult::offline(address),
        }
    }
}

/// A pool that works through a few jobs and then reports a dispatch failure.
pub struct FailingPool {
    pub after: usize,
}

#[async_trait]
impl WorkerPool for FailingPool {
    async fn run(
        &self,
        jobs: &mut (dyn Iterator<Item = ScanJob> + Send),
        ctx: &ScanContext,
    ) -> Result<Vec<ProbeResult>, SchedulerError> {
        let mut partial = Vec::new();
        for job in jobs.take(self.after) {
            partial.push(job.run(ctx.prober.as_ref()).await);
        }
        Err(SchedulerError::Dispatch(format!(
            "substrate died after {} jobs",
            partial.len()
        )))
    }
}

/// A pool that cannot even start.
pub struct UnavailablePool;

#[async_trait]
impl WorkerPool for UnavailablePool {
    async fn run(
        &self,
        _jobs: &mut (dyn Iterator<Item = ScanJob> + Send),
        _ctx: &ScanContext,
    ) -> Result<Vec<ProbeResult>, SchedulerError> {
        Err(SchedulerError::Init("no runtime available".to_string()))
    }
}

pub fn mac(last: u8) -> MacAddr {
    MacAddr::new(0x00, 0x1b, 0x21, 0x0a, 0x0b, last)
}

pub fn sorted(mut results: Vec<ProbeResult>) -> Vec<ProbeResult> {
    results.sort_by_key(|r| r.address);
    results
}
