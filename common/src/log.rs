//! Logging macros shared by all crates.
//!
//! Thin wrappers over [`tracing`] so that call sites read the same everywhere and the
//! CLI formatter can pick out `success!` events by their target.

#[doc(hidden)]
pub use tracing as __tracing;

/// Target used for events that report a completed step.
pub const SUCCESS_TARGET: &str = "sweepr::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!(target: "sweepr::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}
