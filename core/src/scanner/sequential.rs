use sweepr_common::network::host::ProbeResult;

use super::{ScanContext, ScanJob};

/// Probes one address at a time on the calling task. Stops at cancellation,
/// abandoning the probe in flight.
pub(super) async fn run(jobs: impl Iterator<Item = ScanJob>, ctx: &ScanContext) -> Vec<ProbeResult> {
    let mut results = super::result_buffer(jobs.size_hint().0);
    for job in jobs {
        let result = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            result = job.run(ctx.prober.as_ref()) => result,
        };
        ctx.record(&result);
        results.push(result);
    }
    results
}
