//! Runs the bridge from bootstrap to shutdown.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::status::{StatusReporter, StructuredStatusReporter};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Runs the bridge using the production collaborators.
///
/// # Errors
///
/// See [`run_bridge_with`].
pub fn run_bridge() -> Result<(), LaunchError> {
    let reporter = Arc::new(StructuredStatusReporter::new());
    run_bridge_with(&SystemConfigLoader, reporter, &SystemShutdownSignal::new())
}

/// Runs the bridge with injected collaborators: bootstrap, start the server,
/// block until `shutdown` fires, then stop the server.
///
/// # Errors
///
/// Returns a [`LaunchError`] when bootstrap fails, the listener cannot be
/// started or stopped, or the shutdown signal cannot be installed.
pub fn run_bridge_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn StatusReporter>,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let mut bridge = bootstrap_with(loader, reporter)?;
    info!(
        target: PROCESS_TARGET,
        workspace = %bridge.workspace(),
        "starting bridge runtime"
    );
    let server = bridge.server_mut();
    server.start()?;
    let waited = shutdown.wait();
    server.stop()?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
