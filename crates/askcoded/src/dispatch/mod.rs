//! JSON request dispatch.
//!
//! Each connection carries exactly one request and receives exactly one
//! response:
//!
//! ```json
//! {"type":"CodeAction","rootPath":"/tmp/proj","filePath":"main.ts",
//!  "buffer":"...","line":"5","offset":"3"}
//! ```
//!
//! ```json
//! {"status":"1 actions returned","type":"CodeAction",
//!  "actions":[{"title":"Add import","textChanges":[...]}]}
//! ```
//!
//! Requests are decoded into [`BridgeRequest`], routed by [`RequestRouter`],
//! and code-action requests run through the [`CodeActionPipeline`].

mod code_action;
mod errors;
mod handler;
mod request;
mod response;
mod router;

pub use self::code_action::CodeActionPipeline;
pub use self::errors::DispatchError;
pub use self::handler::DispatchConnectionHandler;
pub use self::request::{BridgeRequest, ChangeWorkspaceRequest, CodeActionRequest};
pub use self::response::{
    BridgeResponse, ResponseKind, STATUS_CHANGING_WORKSPACE, STATUS_LOOKUP_FAILED,
    STATUS_NO_ACTIONS, STATUS_NO_DATA, STATUS_PONG, STATUS_WRONG_WORKSPACE, WireCodeAction,
};
pub use self::router::RequestRouter;
