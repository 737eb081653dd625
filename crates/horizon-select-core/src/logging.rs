//! Logging facilities for Horizon Select.
//!
//! Horizon Select uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_select=debug")
//!     .init();
//! ```
//!
//! Each subsystem logs under its own target (see [`targets`]) so that, for
//! example, pointer movement can be traced without the selection noise.

/// Span names used throughout Horizon Select for tracing.
pub mod span_names {
    /// Filtered option list recomputation.
    pub const FILTER: &str = "horizon_select::filter";
    /// Value expansion against the option list.
    pub const EXPAND: &str = "horizon_select::expand";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_select_core::signal";
    /// Selection store target.
    pub const SELECTION: &str = "horizon_select::selection";
    /// Typeahead pointer target.
    pub const POINTER: &str = "horizon_select::pointer";
    /// Keydown dispatch target.
    pub const KEYMAP: &str = "horizon_select::keymap";
    /// Option labels and keys target.
    pub const OPTION: &str = "horizon_select::option";
    /// Component-level events target.
    pub const SELECT: &str = "horizon_select::select";
    /// Performance spans target.
    pub const PERF: &str = "horizon_select::perf";
}

/// A span that records the duration of an operation.
///
/// The span is entered on creation and exited when dropped.
///
/// ```
/// use horizon_select_core::PerfSpan;
///
/// fn recompute() {
///     let _span = PerfSpan::new("filter");
///     // ... work ...
/// }
/// # recompute();
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Log a trace message under the selection target.
#[macro_export]
macro_rules! select_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::SELECTION, $($arg)*)
    };
}

/// Log a debug message under the selection target.
#[macro_export]
macro_rules! select_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::SELECTION, $($arg)*)
    };
}

/// Log a warning under the selection target.
#[macro_export]
macro_rules! select_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::SELECTION, $($arg)*)
    };
}
