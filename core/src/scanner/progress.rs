use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const REPORT_EVERY: usize = 10;

/// Snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
    pub online: usize,
}

pub type ProgressCallback = Arc<dyn Fn(ScanProgress) + Send + Sync>;

pub(crate) struct ProgressTracker {
    total: usize,
    completed: AtomicUsize,
    online: AtomicUsize,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize, callback: Option<ProgressCallback>) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            online: AtomicUsize::new(0),
            callback,
        }
    }

    pub(crate) fn record(&self, online: bool) {
        let online = if online {
            self.online.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.online.load(Ordering::Relaxed)
        };
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(callback) = &self.callback
            && (completed % REPORT_EVERY == 0 || completed == self.total)
        {
            callback(ScanProgress {
                completed,
                total: self.total,
                online,
            });
        }
    }

    pub(crate) fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.online.store(0, Ordering::Relaxed);
    }
}
