//! Request routing.
//!
//! The router turns every decoded request, and every decode failure, into
//! exactly one [`BridgeResponse`]. Nothing it handles escapes as an error.

use tracing::{debug, error, warn};

use crate::editor::EditorHost;

use super::code_action::CodeActionPipeline;
use super::errors::DispatchError;
use super::request::{BridgeRequest, ChangeWorkspaceRequest, CodeActionRequest};
use super::response::BridgeResponse;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes requests to their handlers.
pub struct RequestRouter {
    host: EditorHost,
    pipeline: CodeActionPipeline,
}

impl RequestRouter {
    /// Creates a router that drives `host` and runs code actions through
    /// `pipeline`.
    #[must_use]
    pub const fn new(host: EditorHost, pipeline: CodeActionPipeline) -> Self {
        Self { host, pipeline }
    }

    /// Decodes `payload` and routes it.
    ///
    /// Absent or malformed payloads are answered with "No data?".
    #[must_use]
    pub fn route_payload(&self, payload: &[u8]) -> BridgeResponse {
        BridgeRequest::parse(payload).map_or_else(
            |error| Self::reject(&error),
            |request| self.route(&request),
        )
    }

    /// Answers a payload that never reached the decoder.
    #[must_use]
    pub(crate) fn reject(error: &DispatchError) -> BridgeResponse {
        warn!(target: DISPATCH_TARGET, %error, "rejecting request");
        BridgeResponse::no_data()
    }

    /// Routes a decoded request.
    #[must_use]
    pub fn route(&self, request: &BridgeRequest) -> BridgeResponse {
        debug!(target: DISPATCH_TARGET, kind = request.kind(), "routing request");
        match request {
            BridgeRequest::Ping => BridgeResponse::pong(),
            BridgeRequest::ChangeWorkspace(change) => self.change_workspace(change),
            BridgeRequest::CodeAction(code_action) => self.code_action(code_action),
        }
    }

    fn change_workspace(&self, request: &ChangeWorkspaceRequest) -> BridgeResponse {
        self.host
            .switcher
            .switch_workspace(request.root_path(), false);
        BridgeResponse::changing_workspace()
    }

    fn code_action(&self, request: &CodeActionRequest) -> BridgeResponse {
        match self.pipeline.run(request) {
            Ok(response) => response,
            Err(failure) if failure.is_client_error() => {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %failure,
                    file = request.file_path(),
                    "code action lookup rejected"
                );
                BridgeResponse::lookup_failed()
            }
            Err(failure) => {
                error!(
                    target: DISPATCH_TARGET,
                    error = %failure,
                    file = request.file_path(),
                    "code action lookup failed"
                );
                BridgeResponse::lookup_failed()
            }
        }
    }
}
