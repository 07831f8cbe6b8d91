//! **ScanScheduler**: fans host probes out across an address range.
//!
//! Work is handed to a [`WorkerPool`]. The production pool runs at most `concurrency`
//! probes at once on the tokio runtime. If the pool cannot start, or a worker dies
//! mid-dispatch, the scheduler throws away whatever the pool produced and rescans the
//! whole range one address at a time.
//!
//! ```text
//! Idle ─► Dispatching ─► Draining ─► Complete
//!              │             │
//!              └─────┬───────┘
//!                    ▼
//!           DegradedSequential ─► Complete
//! ```

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use sweepr_common::config::Config;
use sweepr_common::error::SchedulerError;
use sweepr_common::network::host::ProbeResult;
use sweepr_common::probe::Prober;
use sweepr_common::report::{ScanMode, ScanReport};
use sweepr_common::{debug, info, warn};

mod pool;
mod progress;
mod sequential;

pub use pool::TokioPool;
pub use progress::{ProgressCallback, ScanProgress};

use progress::ProgressTracker;

/// Upper bound on the result buffer reserved before a scan. Larger ranges grow it
/// as results arrive.
const MAX_RESERVED_RESULTS: usize = 1 << 16;

pub(crate) fn result_buffer(expected: usize) -> Vec<ProbeResult> {
    Vec::with_capacity(expected.min(MAX_RESERVED_RESULTS))
}

/// A single unit of work: probe one address with one deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanJob {
    pub address: Ipv4Addr,
    pub timeout: Duration,
}

impl ScanJob {
    pub async fn run(self, prober: &dyn Prober) -> ProbeResult {
        prober.probe(self.address, self.timeout).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Dispatching,
    Draining,
    DegradedSequential,
    Complete,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Dispatching => "dispatching",
            Self::Draining => "draining",
            Self::DegradedSequential => "degraded-sequential",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Everything a worker pool needs to run the jobs of one scan.
pub struct ScanContext {
    pub prober: Arc<dyn Prober>,
    /// Maximum number of probes in flight.
    pub limit: usize,
    pub cancel: CancellationToken,
    progress: ProgressTracker,
    state: Arc<Mutex<SchedulerState>>,
}

impl ScanContext {
    pub fn new(prober: Arc<dyn Prober>, limit: usize, cancel: CancellationToken) -> Self {
        Self {
            prober,
            limit,
            cancel,
            progress: ProgressTracker::new(0, None),
            state: Arc::new(Mutex::new(SchedulerState::Idle)),
        }
    }

    /// Counts a finished probe towards the progress report.
    pub fn record(&self, result: &ProbeResult) {
        self.progress.record(result.is_online);
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_state(&self, next: SchedulerState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != next {
            debug!("Scheduler {} -> {}", *state, next);
            *state = next;
        }
    }
}

/// An execution substrate for scan jobs.
///
/// A pool must return exactly one result per job it was given, or an error. Partial
/// output is never merged with a retry.
#[async_trait]
pub trait WorkerPool: Send + Sync {
    async fn run(
        &self,
        jobs: &mut (dyn Iterator<Item = ScanJob> + Send),
        ctx: &ScanContext,
    ) -> Result<Vec<ProbeResult>, SchedulerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub timeout: Duration,
    pub concurrency: usize,
    /// Skip the worker pool entirely.
    pub sequential: bool,
}

impl From<&Config> for ScanOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            timeout: cfg.timeout,
            concurrency: cfg.concurrency,
            sequential: cfg.sequential,
        }
    }
}

/// Raw, unfiltered output of a scan: one result per address that was probed.
#[derive(Debug)]
pub struct ScanOutcome {
    pub results: Vec<ProbeResult>,
    pub mode: ScanMode,
    pub cancelled: bool,
    pub elapsed: Duration,
}

pub struct ScanScheduler {
    prober: Arc<dyn Prober>,
    pool: Box<dyn WorkerPool>,
    progress: Option<ProgressCallback>,
    state: Arc<Mutex<SchedulerState>>,
}

impl ScanScheduler {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self::with_pool(prober, Box::new(TokioPool))
    }

    pub fn with_pool(prober: Arc<dyn Prober>, pool: Box<dyn WorkerPool>) -> Self {
        Self {
            prober,
            pool,
            progress: None,
            state: Arc::new(Mutex::new(SchedulerState::Idle)),
        }
    }

    /// Called every 10 completed probes and once more when the range is done.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ScanProgress) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Probes every address and returns the unfiltered results.
    ///
    /// `addresses` is iterated again from the start if the scan degrades to the
    /// sequential path, so it must be cheap to clone.
    pub async fn collect<I>(
        &self,
        addresses: I,
        options: &ScanOptions,
        cancel: &CancellationToken,
    ) -> ScanOutcome
    where
        I: IntoIterator<Item = Ipv4Addr> + Clone + Send + Sync,
        I::IntoIter: Send,
    {
        let started = Instant::now();
        let timeout = options.timeout;
        let jobs = || {
            addresses
                .clone()
                .into_iter()
                .map(move |address| ScanJob { address, timeout })
        };

        let (lower, upper) = jobs().size_hint();
        let ctx = ScanContext {
            prober: self.prober.clone(),
            limit: options.concurrency,
            cancel: cancel.clone(),
            progress: ProgressTracker::new(upper.unwrap_or(lower), self.progress.clone()),
            state: self.state.clone(),
        };
        ctx.set_state(SchedulerState::Idle);

        let (results, mode) = if options.sequential {
            info!("Sequential scan requested, probing one address at a time");
            ctx.set_state(SchedulerState::DegradedSequential);
            (sequential::run(jobs(), &ctx).await, ScanMode::Sequential)
        } else {
            match self.pool.run(&mut jobs(), &ctx).await {
                Ok(results) => (results, ScanMode::Concurrent),
                Err(e) => {
                    warn!("{e}, falling back to a sequential scan");
                    ctx.progress.reset();
                    ctx.set_state(SchedulerState::DegradedSequential);
                    (sequential::run(jobs(), &ctx).await, ScanMode::Sequential)
                }
            }
        };

        ctx.set_state(SchedulerState::Complete);
        ScanOutcome {
            results,
            mode,
            cancelled: cancel.is_cancelled(),
            elapsed: started.elapsed(),
        }
    }

    /// Probes every address and keeps the hosts that answered, in address order.
    pub async fn scan<I>(
        &self,
        addresses: I,
        options: &ScanOptions,
        cancel: &CancellationToken,
    ) -> ScanReport
    where
        I: IntoIterator<Item = Ipv4Addr> + Clone + Send + Sync,
        I::IntoIter: Send,
    {
        let outcome = self.collect(addresses, options, cancel).await;
        if outcome.cancelled {
            warn!("Scan cancelled after {} probes", outcome.results.len());
        }
        ScanReport::aggregate(
            &outcome.results,
            outcome.elapsed,
            outcome.mode,
            outcome.cancelled,
        )
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
