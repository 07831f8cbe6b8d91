//! Error taxonomy.
//!
//! Only [`SweepError`] ever stops a scan. [`ProbeError`] and [`SchedulerError`] are
//! recovered where they occur: the first by the ping-process fallback, the second by
//! the sequential scan path.

use std::io;
use std::net::Ipv4Addr;

use thiserror::Error;

/// Fatal input errors, raised before any probe is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    /// Bad CIDR text, out-of-range octet or prefix.
    #[error("malformed input '{token}': {reason}")]
    MalformedInput { token: String, reason: String },

    /// The last address of a range sorts before the first.
    #[error("invalid range: {last} comes before {first}")]
    InvalidRange { first: Ipv4Addr, last: Ipv4Addr },

    /// A numeric scan parameter outside its accepted bounds.
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidArgument {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl SweepError {
    pub(crate) fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of a liveness transport.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The ICMP facility cannot be used at all (no privilege, no raw sockets).
    #[error("ICMP transport unavailable: {0}")]
    TransportUnavailable(#[source] io::Error),

    /// The transport opened but an individual exchange failed.
    #[error("probe I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure of the concurrent execution substrate.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("worker pool could not be initialized: {0}")]
    Init(String),

    #[error("worker dispatch failed: {0}")]
    Dispatch(String),
}
