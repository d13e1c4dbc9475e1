//! Logging facilities for Horizon Mosaic.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Mosaic uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber itself; to see logs, install one in your
//! application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout Horizon Mosaic for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Snapshot reconciliation span.
    pub const RECONCILE: &str = "horizon_mosaic::reconcile";
    /// Section geometry computation span.
    pub const LAYOUT: &str = "horizon_mosaic::layout";
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_mosaic::signal";
    /// Surface refresh span.
    pub const REFRESH: &str = "horizon_mosaic::refresh";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_mosaic_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_mosaic_core::signal";
    /// Layout engine target.
    pub const LAYOUT: &str = "horizon_mosaic::layout";
    /// Snapshot reconciler target.
    pub const RECONCILE: &str = "horizon_mosaic::reconcile";
    /// Pager sync channel target.
    pub const PAGER: &str = "horizon_mosaic::pager";
    /// Composition surface target.
    pub const SURFACE: &str = "horizon_mosaic::surface";
}

/// A guard that emits a tracing span when dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_mosaic::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are re-exported for convenience but are just wrappers around
/// the `tracing` crate macros with consistent target naming.
#[macro_export]
macro_rules! mosaic_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_mosaic_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! mosaic_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_mosaic_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! mosaic_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "horizon_mosaic_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! mosaic_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_mosaic_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! mosaic_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "horizon_mosaic_core", $($arg)*)
    };
}
