use crate::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default request for the runtime source helper.
pub const DEFAULT_RUNTIME_HELPER: &str = "htmlweave/runtime/get-source.js";

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned runtime helper request.
#[must_use]
pub fn default_runtime_helper_string() -> String {
    DEFAULT_RUNTIME_HELPER.to_owned()
}
