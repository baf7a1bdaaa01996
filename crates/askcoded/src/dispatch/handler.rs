//! Connection handler that answers one JSON request per connection.
//!
//! Clients do not frame their payload and usually keep the socket open while
//! waiting for the answer, so the handler keeps reading until the bytes form
//! a complete JSON document, the peer half-closes, or the size limit is hit.

use std::io::{self, Read};
use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::{debug, warn};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::errors::DispatchError;
use super::response::{BridgeResponse, ResponseWriter};
use super::router::{DISPATCH_TARGET, RequestRouter};

/// Maximum size of a single request in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Connection handler that routes each request through a [`RequestRouter`].
pub struct DispatchConnectionHandler {
    router: Arc<RequestRouter>,
}

impl DispatchConnectionHandler {
    /// Creates a handler that answers with `router`.
    #[must_use]
    pub const fn new(router: Arc<RequestRouter>) -> Self {
        Self { router }
    }

    fn dispatch(&self, mut stream: ConnectionStream) {
        let response = match read_request(&mut stream) {
            Ok(payload) => self.router.route_payload(&payload),
            Err(DispatchError::Io(error)) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to read request");
                return;
            }
            Err(error) => RequestRouter::reject(&error),
        };
        respond(&mut stream, &response);
        stream.close();
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.dispatch(stream);
    }
}

fn respond(stream: &mut ConnectionStream, response: &BridgeResponse) {
    debug!(
        target: DISPATCH_TARGET,
        status = %response.status,
        "writing response"
    );
    if let Err(error) = ResponseWriter::new(stream).write_response(response) {
        warn!(target: DISPATCH_TARGET, %error, "failed to write response");
    }
}

/// Reads bytes until they form a complete JSON document or the stream ends.
///
/// An empty vector means the client closed without sending anything.
fn read_request<R: Read>(stream: &mut R) -> Result<Vec<u8>, DispatchError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 16 * 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;
        if bytes_read == 0 {
            return Ok(buffer);
        }
        buffer.extend_from_slice(chunk.get(..bytes_read).unwrap_or_default());
        enforce_limit(buffer.len())?;
        if is_complete_document(&buffer) {
            return Ok(buffer);
        }
    }
}

/// True unless the bytes are a strict prefix of a JSON document.
///
/// Invalid JSON counts as complete: waiting for more bytes cannot fix it.
fn is_complete_document(bytes: &[u8]) -> bool {
    serde_json::from_slice::<IgnoredAny>(bytes).map_or_else(|error| !error.is_eof(), |_| true)
}

/// Reads from the stream, retrying on interrupts.
fn read_with_retry<R: Read>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Enforces the maximum request size limit.
const fn enforce_limit(size: usize) -> Result<(), DispatchError> {
    if size > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(size, MAX_REQUEST_BYTES));
    }
    Ok(())
}
