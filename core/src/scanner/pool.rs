use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use sweepr_common::error::SchedulerError;
use sweepr_common::network::host::ProbeResult;

use super::{ScanContext, ScanJob, SchedulerState, WorkerPool};

/// Runs probes as tokio tasks, never more than `ctx.limit` at once.
///
/// A permit is taken before a task is spawned, so the number of live tasks is bounded
/// no matter how large the range is. A worker that panics fails the whole run.
pub struct TokioPool;

#[async_trait]
impl WorkerPool for TokioPool {
    async fn run(
        &self,
        jobs: &mut (dyn Iterator<Item = ScanJob> + Send),
        ctx: &ScanContext,
    ) -> Result<Vec<ProbeResult>, SchedulerError> {
        if ctx.limit == 0 || ctx.limit > Semaphore::MAX_PERMITS {
            return Err(SchedulerError::Init(format!(
                "cannot size a worker pool for {} workers",
                ctx.limit
            )));
        }

        let permits = Arc::new(Semaphore::new(ctx.limit));
        let mut workers: JoinSet<ProbeResult> = JoinSet::new();
        let mut results = super::result_buffer(jobs.size_hint().0);

        ctx.set_state(SchedulerState::Dispatching);
        for job in jobs {
            let permit = tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => break,
                permit = permits.clone().acquire_owned() => {
                    permit.map_err(|e| SchedulerError::Dispatch(e.to_string()))?
                }
            };

            let prober = ctx.prober.clone();
            workers.spawn(async move {
                let result = job.run(prober.as_ref()).await;
                drop(permit);
                result
            });

            while let Some(joined) = workers.try_join_next() {
                if let Some(result) = settle(joined)? {
                    ctx.record(&result);
                    results.push(result);
                }
            }
        }

        ctx.set_state(SchedulerState::Draining);
        let mut aborted = false;
        loop {
            let joined = tokio::select! {
                biased;
                _ = ctx.cancel.cancelled(), if !aborted => {
                    workers.abort_all();
                    aborted = true;
                    continue;
                }
                joined = workers.join_next() => joined,
            };
            let Some(joined) = joined else { break };
            if let Some(result) = settle(joined)? {
                ctx.record(&result);
                results.push(result);
            }
        }

        Ok(results)
    }
}

/// Aborted tasks are dropped silently; anything else that kept a task from finishing
/// is a dispatch failure.
fn settle(joined: Result<ProbeResult, JoinError>) -> Result<Option<ProbeResult>, SchedulerError> {
    match joined {
        Ok(result) => Ok(Some(result)),
        Err(e) if e.is_cancelled() => Ok(None),
        Err(e) => Err(SchedulerError::Dispatch(format!("probe worker failed: {e}"))),
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
