use std::time::Duration;

use crate::error::SweepError;

pub const DEFAULT_TIMEOUT_MS: u64 = 500;
pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_CONCURRENCY: usize = 100;
pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 500;

/// Validated scan parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-probe timeout for the liveness check.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
    /// Skips the worker pool and probes one address at a time.
    pub sequential: bool,
    /// Looks up the hardware vendor of every resolved MAC.
    pub resolve_vendors: bool,
    /// 0 prints everything, 1 hides decorations, 2 prints only the summary.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            concurrency: DEFAULT_CONCURRENCY,
            sequential: false,
            resolve_vendors: true,
            quiet: 0,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    timeout_ms: Option<u64>,
    concurrency: Option<usize>,
    sequential: bool,
    no_vendor: bool,
    quiet: u8,
}

impl ConfigBuilder {
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    pub fn no_vendor(mut self, no_vendor: bool) -> Self {
        self.no_vendor = no_vendor;
        self
    }

    pub fn quiet(mut self, quiet: u8) -> Self {
        self.quiet = quiet.min(2);
        self
    }

    pub fn build(self) -> Result<Config, SweepError> {
        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(SweepError::InvalidArgument {
                name: "timeout (ms)",
                value: timeout_ms,
                min: MIN_TIMEOUT_MS,
                max: MAX_TIMEOUT_MS,
            });
        }

        let concurrency = self.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(SweepError::InvalidArgument {
                name: "concurrency",
                value: concurrency as u64,
                min: MIN_CONCURRENCY as u64,
                max: MAX_CONCURRENCY as u64,
            });
        }

        Ok(Config {
            timeout: Duration::from_millis(timeout_ms),
            concurrency,
            sequential: self.sequential,
            resolve_vendors: !self.no_vendor,
            quiet: self.quiet,
        })
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
