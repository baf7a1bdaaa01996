use std::time::Duration;

use crate::listen::ListenEndpoint;
use crate::logging::LogFormat;

/// Loopback address the bridge binds by default.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the editor plugins connect to.
pub const DEFAULT_PORT: u16 = 5004;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Host editor CLI used to reopen a workspace.
pub const DEFAULT_EDITOR_COMMAND: &str = "code";

/// Pause after staging a buffer, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 400;

/// Pause after staging a buffer so the host can finish loading the file.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(DEFAULT_SETTLE_DELAY_MS);

/// Number of code-action queries before giving up.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;

/// Pause between two empty code-action queries, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Pause between two empty code-action queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default listen endpoint, `tcp://127.0.0.1:5004`.
#[must_use]
pub fn default_listen_endpoint() -> ListenEndpoint {
    ListenEndpoint::new(DEFAULT_HOST, DEFAULT_PORT)
}
