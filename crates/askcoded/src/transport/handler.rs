//! Connection handling abstractions for the bridge listener.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use tracing::debug;

use super::LISTENER_TARGET;

/// An accepted client connection.
pub(crate) struct ConnectionStream {
    inner: TcpStream,
}

impl ConnectionStream {
    pub(crate) const fn new(inner: TcpStream) -> Self {
        Self { inner }
    }

    /// Shuts both directions down so the client sees end of stream.
    pub(crate) fn close(self) {
        if let Err(error) = self.inner.shutdown(Shutdown::Both)
            && error.kind() != io::ErrorKind::NotConnected
        {
            debug!(
                target: LISTENER_TARGET,
                error = %error,
                "failed to shut down connection"
            );
        }
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Handles accepted socket connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection. Implementations should avoid panicking.
    fn handle(&self, stream: ConnectionStream);
}
