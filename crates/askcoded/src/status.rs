//! Structured status reporting for bridge lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use askcode_config::Config;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

const STATUS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::status");

/// Observer trait used to surface lifecycle events, for example to drive a
/// running/stopped indicator.
pub trait StatusReporter: Send + Sync {
    /// Configuration is about to be loaded.
    fn bootstrap_starting(&self);

    /// The server has been assembled; it is not listening yet.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Bootstrap stopped at `error`; no server exists.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the listener accepts connections on `addr`.
    fn listening(&self, addr: SocketAddr);

    /// Invoked after the listener has closed.
    fn closed(&self);

    /// Invoked when the listener fails to start or stops abnormally.
    fn error(&self, error: &ListenerError);
}

impl<T> StatusReporter for Arc<T>
where
    T: StatusReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn listening(&self, addr: SocketAddr) {
        (**self).listening(addr);
    }

    fn closed(&self) {
        (**self).closed();
    }

    fn error(&self, error: &ListenerError) {
        (**self).error(error);
    }
}

/// Reporter that turns lifecycle events into `tracing` records on the
/// `askcoded::status` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredStatusReporter;

impl StructuredStatusReporter {
    /// Builds the reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StatusReporter for StructuredStatusReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: STATUS_TARGET,
            event = "bridge_bootstrap_starting",
            "starting bridge bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: STATUS_TARGET,
            event = "bridge_bootstrap_succeeded",
            listen = %config.listen(),
            workspace = config.workspace.as_ref().map_or("<cwd>", |root| root.as_str()),
            log_format = %config.log_format(),
            "bridge bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: STATUS_TARGET,
            event = "bridge_bootstrap_failed",
            error = %error,
            "bridge bootstrap failed"
        );
    }

    fn listening(&self, addr: SocketAddr) {
        tracing::info!(
            target: STATUS_TARGET,
            event = "bridge_listening",
            %addr,
            "bridge running"
        );
    }

    fn closed(&self) {
        tracing::info!(
            target: STATUS_TARGET,
            event = "bridge_closed",
            "bridge stopped"
        );
    }

    fn error(&self, error: &ListenerError) {
        tracing::error!(
            target: STATUS_TARGET,
            event = "bridge_error",
            error = %error,
            "bridge listener failed"
        );
    }
}
