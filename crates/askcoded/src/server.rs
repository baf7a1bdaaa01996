//! Owned handle over the bridge listener.
//!
//! [`BridgeServer`] replaces a process-wide server singleton: the host holds
//! one value, starts and stops it explicitly, and the listener is shut down
//! when the value is dropped.

use std::net::SocketAddr;
use std::sync::Arc;

use askcode_config::ListenEndpoint;
use tracing::debug;

use crate::dispatch::{DispatchConnectionHandler, RequestRouter};
use crate::editor::HostUi;
use crate::status::StatusReporter;
use crate::transport::{ConnectionHandler, ListenerError, ListenerHandle, SocketListener};

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Notice shown when `start` is called on a running server.
pub const NOTICE_ALREADY_RUNNING: &str = "Code action bridge is already running";
/// Notice shown after a successful `start`.
pub const NOTICE_STARTED: &str = "Started code action bridge";
/// Notice shown after `stop`.
pub const NOTICE_STOPPED: &str = "Stopped code action bridge";

/// What [`BridgeServer::start`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new listener is accepting connections on the address.
    Started(SocketAddr),
    /// The server was already running on the address; nothing changed.
    AlreadyRunning(SocketAddr),
}

struct RunningListener {
    handle: ListenerHandle,
    addr: SocketAddr,
}

/// Start/stop handle for the bridge's TCP listener.
pub struct BridgeServer {
    endpoint: ListenEndpoint,
    handler: Arc<dyn ConnectionHandler>,
    ui: Arc<dyn HostUi>,
    reporter: Arc<dyn StatusReporter>,
    running: Option<RunningListener>,
}

impl BridgeServer {
    /// Creates a stopped server that will answer requests with `router`.
    #[must_use]
    pub fn new(
        endpoint: ListenEndpoint,
        router: RequestRouter,
        ui: Arc<dyn HostUi>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        let handler = Arc::new(DispatchConnectionHandler::new(Arc::new(router)));
        Self::with_handler(endpoint, handler, ui, reporter)
    }

    #[must_use]
    pub(crate) const fn with_handler(
        endpoint: ListenEndpoint,
        handler: Arc<dyn ConnectionHandler>,
        ui: Arc<dyn HostUi>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            endpoint,
            handler,
            ui,
            reporter,
            running: None,
        }
    }

    /// Starts listening unless already running.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] when the endpoint cannot be bound. The
    /// failure is also reported to the status reporter and the user.
    pub fn start(&mut self) -> Result<StartOutcome, ListenerError> {
        if let Some(running) = &self.running {
            if running.handle.is_running() {
                self.ui.show_info(NOTICE_ALREADY_RUNNING);
                return Ok(StartOutcome::AlreadyRunning(running.addr));
            }
            if let Err(error) = self.discard_listener() {
                debug!(target: SERVER_TARGET, %error, "discarded dead listener");
            }
        }

        let running = self.spawn_listener().inspect_err(|error| {
            self.reporter.error(error);
            self.ui
                .show_error(&format!("Failed to start code action bridge: {error}"));
        })?;
        let addr = running.addr;
        self.running = Some(running);
        self.reporter.listening(addr);
        self.ui.show_info(&format!("{NOTICE_STARTED} on {addr}"));
        Ok(StartOutcome::Started(addr))
    }

    fn spawn_listener(&self) -> Result<RunningListener, ListenerError> {
        let listener = SocketListener::bind(&self.endpoint)?;
        let addr = listener.local_addr()?;
        let handle = listener.start(Arc::clone(&self.handler))?;
        Ok(RunningListener { handle, addr })
    }

    /// Stops the listener, if any, and waits for it to release the port.
    ///
    /// The stop notice is shown whether or not the server was running.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] when the accept loop panicked.
    pub fn stop(&mut self) -> Result<(), ListenerError> {
        let result = self.discard_listener();
        self.ui.show_info(NOTICE_STOPPED);
        result
    }

    fn discard_listener(&mut self) -> Result<(), ListenerError> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        running.handle.shutdown();
        running
            .handle
            .join()
            .inspect_err(|error| self.reporter.error(error))?;
        self.reporter.closed();
        Ok(())
    }

    /// True iff the listener is live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.handle.is_running())
    }

    /// Address of the live listener.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running
            .as_ref()
            .filter(|running| running.handle.is_running())
            .map(|running| running.addr)
    }
}

impl Drop for BridgeServer {
    fn drop(&mut self) {
        if let Some(running) = &self.running {
            running.handle.shutdown();
        }
    }
}
