//! Logging facilities for Horizon Columns.
//!
//! Horizon Columns uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_columns::layout=debug")
//!     .init();
//! ```
//!
//! Every subsystem logs under one of the [`targets`], so a single directive
//! is enough to follow a layout pass or an interactive drag.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_columns_core::signal";
    /// Width allocation passes and drag-resize sessions.
    pub const LAYOUT: &str = "horizon_columns::layout";
    /// Resize manipulator state transitions.
    pub const RESIZE: &str = "horizon_columns::resize";
    /// Move (reorder) manipulator state transitions.
    pub const MOVE: &str = "horizon_columns::move";
    /// Header controller scheduling.
    pub const HEADER: &str = "horizon_columns::header";
    /// Configuration and persisted state loading.
    pub const CONFIG: &str = "horizon_columns::config";
    /// Performance spans.
    pub const PERF: &str = "horizon_columns::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of layout passes.
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
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
