//! # sweepr common
//!
//! Domain models and boundaries shared by every sweepr crate.
//!
//! * **[`network`]**: address arithmetic, CIDR ranges, link-layer addresses and the
//!   per-host probe results.
//! * **[`probe`]**: the traits a host probe is assembled from.
//! * **[`report`]**: aggregation of probe results into the final scan report.
//!
//! Nothing in here touches sockets or spawns processes; the concrete adapters
//! live in `sweepr-core`.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod probe;
pub mod report;
pub mod vendors;
