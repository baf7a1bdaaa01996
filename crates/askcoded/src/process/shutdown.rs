//! Termination signal handling for the bridge process.

use std::ffi::c_int;
use std::io;

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use signal_hook::low_level::signal_name;
use thiserror::Error;
use tracing::info;

use super::PROCESS_TARGET;

/// Signals that stop the bridge.
const TERMINATION_SIGNALS: [c_int; 4] = [SIGTERM, SIGINT, SIGQUIT, SIGHUP];

/// Source of the "stop serving" notification.
pub trait ShutdownSignal: Send + Sync {
    /// Blocks until the bridge should stop.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError`] when the notification cannot be set up.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal sources.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The termination signal handlers could not be registered.
    #[error("failed to register termination signal handlers: {source}")]
    Register {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Waits for SIGTERM, SIGINT, SIGQUIT or SIGHUP.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl SystemShutdownSignal {
    /// Builds a signal source. Handlers are registered on [`wait`](ShutdownSignal::wait).
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals =
            Signals::new(TERMINATION_SIGNALS).map_err(|source| ShutdownError::Register { source })?;
        let received = signals.forever().next();
        info!(
            target: PROCESS_TARGET,
            signal = received.and_then(signal_name).unwrap_or("unknown"),
            "stopping bridge"
        );
        Ok(())
    }
}
