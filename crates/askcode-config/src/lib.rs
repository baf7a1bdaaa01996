//! Shared configuration for the askcode bridge daemon.
//!
//! Values are layered in the usual order: built-in defaults, then
//! `ASKCODE_*` environment variables, then command-line flags. The resolved
//! [`Config`] is validated before it is handed to the daemon so a bridge is
//! never bound to a non-loopback interface by accident.

mod defaults;
mod listen;
mod logging;
mod polling;

use std::ffi::OsString;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;

pub use defaults::{
    DEFAULT_EDITOR_COMMAND, DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_POLL_ATTEMPTS,
    DEFAULT_POLL_INTERVAL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_PORT, DEFAULT_SETTLE_DELAY,
    DEFAULT_SETTLE_DELAY_MS, default_listen_endpoint, default_log_filter, default_log_format,
};
pub use listen::{ListenEndpoint, ListenParseError};
pub use logging::LogFormat;
pub use polling::PollSettings;

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "askcoded",
    version,
    about = "Bridges an external editor to an IDE's code actions over a local socket"
)]
pub struct Config {
    /// Endpoint to listen on, for example `tcp://127.0.0.1:5004`.
    #[arg(long, env = "ASKCODE_LISTEN", default_value_t = default_listen_endpoint())]
    pub listen: ListenEndpoint,
    /// Tracing filter expression.
    #[arg(long, env = "ASKCODE_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
    /// Log output format (`json` or `compact`).
    #[arg(long, env = "ASKCODE_LOG_FORMAT", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
    /// Workspace root served by the local editor. Defaults to the current
    /// directory.
    #[arg(long, env = "ASKCODE_WORKSPACE")]
    pub workspace: Option<Utf8PathBuf>,
    /// Editor CLI used to reopen a different workspace.
    #[arg(long, env = "ASKCODE_EDITOR_COMMAND", default_value = DEFAULT_EDITOR_COMMAND)]
    pub editor_command: String,
    /// Milliseconds to wait after staging a buffer before the first query.
    #[arg(long, env = "ASKCODE_SETTLE_DELAY_MS", default_value_t = DEFAULT_SETTLE_DELAY_MS)]
    pub settle_delay_ms: u64,
    /// Maximum number of code-action queries per request.
    #[arg(long, env = "ASKCODE_POLL_ATTEMPTS", default_value_t = DEFAULT_POLL_ATTEMPTS)]
    pub poll_attempts: u32,
    /// Milliseconds between two empty code-action queries.
    #[arg(long, env = "ASKCODE_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,
    /// Accept workspace-switch prompts without asking.
    #[arg(long, env = "ASKCODE_AUTO_SWITCH_WORKSPACE")]
    pub auto_switch_workspace: bool,
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Cli`] when flags or environment values fail to
    /// parse, or a validation error from [`Config::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Loads configuration from an explicit argument list. The first element
    /// is the binary name.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let config = Self::try_parse_from(args).map_err(ConfigError::Cli)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonLoopbackListen`] when the endpoint would
    /// expose the bridge beyond the local machine, and
    /// [`ConfigError::ZeroPollAttempts`] when lookups could never query the
    /// host.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.listen.is_loopback() {
            return Err(ConfigError::NonLoopbackListen {
                endpoint: self.listen.clone(),
            });
        }
        if self.poll_attempts == 0 {
            return Err(ConfigError::ZeroPollAttempts);
        }
        Ok(())
    }

    /// Endpoint the bridge binds.
    #[must_use]
    pub const fn listen(&self) -> &ListenEndpoint {
        &self.listen
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Timing budget for code-action lookups.
    #[must_use]
    pub const fn poll_settings(&self) -> PollSettings {
        PollSettings::new(
            Duration::from_millis(self.settle_delay_ms),
            self.poll_attempts,
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
            workspace: None,
            editor_command: DEFAULT_EDITOR_COMMAND.to_owned(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            auto_switch_workspace: false,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Flags or environment values failed to parse. Also carries clap's
    /// `--help` and `--version` requests.
    #[error(transparent)]
    Cli(clap::Error),
    /// The listen endpoint is reachable from other machines.
    #[error("refusing to listen on non-loopback endpoint {endpoint}")]
    NonLoopbackListen {
        /// Offending endpoint.
        endpoint: ListenEndpoint,
    },
    /// The poll budget allows no queries at all.
    #[error("poll attempts must be at least 1")]
    ZeroPollAttempts,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_matches_parsed_defaults() {
        let parsed = Config::try_parse_from(["askcoded"]).expect("defaults should parse");
        // Environment overrides would make this comparison meaningless.
        if std::env::vars().any(|(key, _)| key.starts_with("ASKCODE_")) {
            return;
        }
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn default_timing_matches_poll_settings_default() {
        assert_eq!(Config::default().poll_settings(), PollSettings::default());
    }

    #[test]
    fn default_listens_on_loopback_5004() {
        let config = Config::default();
        assert_eq!(config.listen().to_string(), "tcp://127.0.0.1:5004");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::load_from_iter([
            "askcoded",
            "--listen",
            "tcp://localhost:6000",
            "--log-format",
            "compact",
            "--poll-attempts",
            "3",
            "--poll-interval-ms",
            "20",
            "--settle-delay-ms",
            "0",
            "--workspace",
            "/tmp/proj",
            "--auto-switch-workspace",
        ])
        .expect("config should load");

        assert_eq!(config.listen().port(), 6000);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(
            config.poll_settings(),
            PollSettings::new(Duration::ZERO, 3, Duration::from_millis(20))
        );
        assert_eq!(
            config.workspace.as_ref().map(|path| path.as_str()),
            Some("/tmp/proj")
        );
        assert!(config.auto_switch_workspace);
    }

    #[rstest]
    #[case::wildcard("tcp://0.0.0.0:5004")]
    #[case::lan("tcp://10.0.0.5:5004")]
    fn rejects_non_loopback_listen(#[case] endpoint: &str) {
        let error = Config::load_from_iter(["askcoded", "--listen", endpoint])
            .expect_err("non-loopback endpoints are refused");
        assert!(matches!(error, ConfigError::NonLoopbackListen { .. }));
    }

    #[test]
    fn rejects_zero_poll_attempts() {
        let error = Config::load_from_iter(["askcoded", "--poll-attempts", "0"])
            .expect_err("zero attempts are refused");
        assert!(matches!(error, ConfigError::ZeroPollAttempts));
    }

    #[test]
    fn reports_unparseable_flags() {
        let error = Config::load_from_iter(["askcoded", "--listen", "unix:///tmp/x.sock"])
            .expect_err("unix endpoints are refused");
        assert!(matches!(error, ConfigError::Cli(_)));
    }
}
