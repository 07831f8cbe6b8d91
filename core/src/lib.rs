//! # sweepr core
//!
//! Concrete probing and scheduling for subnet host discovery.
//!
//! * [`network`]: the OS-facing adapters (ICMP echo, `ping`, neighbor and ARP tables).
//! * [`probe`]: one address in, one [`ProbeResult`](sweepr_common::network::host::ProbeResult) out.
//! * [`scanner`]: bounded fan-out of probes over a range, with a sequential fallback.
//! * [`discovery`]: the use case the CLI drives.

pub mod discovery;
pub mod network;
pub mod probe;
pub mod scanner;
pub mod vendors;
