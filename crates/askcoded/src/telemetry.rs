//! Structured logging for the bridge.
//!
//! Every event goes to stderr: JSON lines by default, compact text when
//! configured. A connection is served on its own thread, so events carry the
//! thread id to keep interleaved requests apart.

use std::io::{self, IsTerminal};

use askcode_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::{self, time::UtcTime};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Proof that the global subscriber is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        /// Expression as configured.
        filter: String,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// Another subscriber already owns the global slot.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Installs the global subscriber on first use.
///
/// Later calls do nothing and hand back another [`TelemetryHandle`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Subscriber`] when a subscriber was installed elsewhere.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install(config))
        .map(|()| TelemetryHandle)
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let filter = parse_filter(config.log_filter())?;
    let subscriber = match config.log_format() {
        LogFormat::Json => json_subscriber(filter),
        LogFormat::Compact => compact_subscriber(filter),
    };
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn parse_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|source| TelemetryError::Filter {
        filter: expression.to_owned(),
        source,
    })
}

fn json_subscriber(filter: EnvFilter) -> BoxedSubscriber {
    Box::new(
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_thread_ids(true)
            .with_ansi(false)
            .json()
            .flatten_event(true)
            .finish(),
    )
}

fn compact_subscriber(filter: EnvFilter) -> BoxedSubscriber {
    Box::new(
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_thread_ids(true)
            .with_ansi(io::stderr().is_terminal())
            .compact()
            .finish(),
    )
}
