//! Connection handler double for listener tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::{ConnectionHandler, ConnectionStream};

/// Closes every connection straight away and counts how many it served.
#[derive(Debug, Default)]
pub(crate) struct CountingHandler {
    served: AtomicUsize,
}

impl CountingHandler {
    pub(crate) fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    /// Waits up to two seconds for `expected` connections.
    pub(crate) fn wait_for(&self, expected: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.served() >= expected {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }
}

impl ConnectionHandler for CountingHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.served.fetch_add(1, Ordering::SeqCst);
        stream.close();
    }
}
