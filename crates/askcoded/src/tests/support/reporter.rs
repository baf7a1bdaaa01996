//! Test double for [`StatusReporter`] that records lifecycle events.

use std::net::SocketAddr;
use std::sync::Mutex;

use askcode_config::Config;

use crate::bootstrap::BootstrapError;
use crate::status::StatusReporter;
use crate::transport::ListenerError;

/// Lifecycle events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// The listener is accepting connections.
    Listening(SocketAddr),
    /// The listener closed.
    Closed,
    /// The listener failed.
    Error,
}

/// Records status events for assertions.
#[derive(Debug, Default)]
pub struct RecordingStatusReporter {
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingStatusReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events
            .lock()
            .expect("status reporter mutex poisoned")
            .clone()
    }

    /// Returns the address of the most recent `Listening` event.
    #[must_use]
    pub fn listening_addr(&self) -> Option<SocketAddr> {
        self.events().iter().rev().find_map(|event| match event {
            StatusEvent::Listening(addr) => Some(*addr),
            _ => None,
        })
    }

    fn record(&self, event: StatusEvent) {
        self.events
            .lock()
            .expect("status reporter mutex poisoned")
            .push(event);
    }
}

impl StatusReporter for RecordingStatusReporter {
    fn bootstrap_starting(&self) {
        self.record(StatusEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(StatusEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(StatusEvent::BootstrapFailed(error.to_string()));
    }

    fn listening(&self, addr: SocketAddr) {
        self.record(StatusEvent::Listening(addr));
    }

    fn closed(&self) {
        self.record(StatusEvent::Closed);
    }

    fn error(&self, _error: &ListenerError) {
        self.record(StatusEvent::Error);
    }
}
