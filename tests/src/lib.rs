//! Cross-crate behavior of the scan pipeline, driven by mock probes.

#[cfg(test)]
mod mock;

mod discovery;
mod scheduler;
