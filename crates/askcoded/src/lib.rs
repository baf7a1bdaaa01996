//! Code-action bridge daemon.
//!
//! `askcoded` lets an external editor ask an IDE-style analysis engine for
//! the code actions available at a cursor. The editor connects to a loopback
//! TCP socket, writes one JSON request and reads one JSON response. Requests
//! are dispatched against a host made of three narrow seams (see
//! [`editor`]): document state and analysis, workspace switching, and
//! user-facing notices.
//!
//! A code-action lookup stages the editor's unsaved buffer in the host's
//! active document, waits for the engine to settle, then polls for actions
//! until a non-empty answer arrives or the budget runs out. Lookups against
//! the same workspace root are serialised because the host has a single
//! active editor.
//!
//! The binary bootstraps through [`bootstrap_with`], which loads
//! configuration, installs telemetry and assembles a stopped
//! [`BridgeServer`]. [`run_bridge`] starts it and blocks until a termination
//! signal arrives.
//!
//! The binary's host is an [`editor::LocalEditor`] over the configured
//! workspace with [`editor::NoCodeActions`] attached, so its lookups stage the
//! buffer and then answer "No actions returned" once the polling budget is
//! spent. Plug a real engine in through [`editor::CodeActionProvider`]. The
//! local root is fixed at startup: a `ChangeWorkspace` request reopens the IDE
//! through the editor CLI but does not move the bridge, so lookups for the new
//! root are answered with the wrong-workspace status until the bridge is
//! restarted there.

mod bootstrap;
pub mod dispatch;
pub mod editor;
mod polling;
mod process;
mod server;
mod status;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, Bridge, ConfigLoader, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use polling::poll_until_non_empty;
pub use process::{
    LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_bridge, run_bridge_with,
};
pub use server::{
    BridgeServer, NOTICE_ALREADY_RUNNING, NOTICE_STARTED, NOTICE_STOPPED, StartOutcome,
};
pub use status::{StatusReporter, StructuredStatusReporter};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
