//! Defines the unified error surface for running the bridge process.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Errors surfaced while launching or supervising the bridge.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrap failed before the server could be built.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// The listener failed to start or to stop cleanly.
    #[error("bridge listener failed: {0}")]
    Listener(#[from] ListenerError),
    /// Waiting for the shutdown signal failed.
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}
