//! Logging for PMQL.
//!
//! All events use target "pmql" and carry a snake_case `event` field.
//! The library never installs a subscriber; the `pmql` binary does.
//!
//! Bound literal values are user data and are never logged. Errors are
//! returned to the caller, not logged here.

/// Target for all PMQL log events.
pub(crate) const PMQL_TARGET: &str = "pmql";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     event = "query_compiled",
///     comparisons = 2,
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::PMQL_TARGET, $($field)*)
    };
}

/// Macro for trace-level log events.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::PMQL_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
