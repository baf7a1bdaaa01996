//! End-to-end world: a running bridge over a temporary workspace, driven
//! through a real socket.

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use askcode_config::{ListenEndpoint, PollSettings};
use camino::Utf8PathBuf;
use serde_json::Value;
use tempfile::TempDir;

use crate::dispatch::{CodeActionPipeline, RequestRouter};
use crate::editor::{EditorHost, LocalEditor};
use crate::server::BridgeServer;

use super::provider::ScriptedProvider;
use super::reporter::RecordingStatusReporter;
use super::ui::{RecordingSwitcher, RecordingUi};

/// Attempts a lookup may take before it gives up.
pub const POLL_ATTEMPTS: u32 = 3;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Scenario world shared across protocol steps.
pub struct BridgeWorld {
    _dir: TempDir,
    root: Utf8PathBuf,
    pub editor: Arc<LocalEditor>,
    pub provider: Arc<ScriptedProvider>,
    pub switcher: Arc<RecordingSwitcher>,
    pub ui: Arc<RecordingUi>,
    pub reporter: Arc<RecordingStatusReporter>,
    server: BridgeServer,
    addr: Option<SocketAddr>,
    response: Option<Value>,
}

impl BridgeWorld {
    /// Builds a stopped bridge over an empty temporary workspace.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create workspace");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("workspace path should be UTF-8");
        let provider = Arc::new(ScriptedProvider::default());
        let editor = Arc::new(LocalEditor::new(root.clone(), provider.clone()));
        let switcher = Arc::new(RecordingSwitcher::default());
        let ui = Arc::new(RecordingUi::default());
        let reporter = Arc::new(RecordingStatusReporter::default());

        let host = EditorHost::new(editor.clone(), switcher.clone(), ui.clone());
        let polling = PollSettings::new(Duration::ZERO, POLL_ATTEMPTS, Duration::from_millis(5));
        let pipeline = CodeActionPipeline::new(host.clone(), polling);
        let router = RequestRouter::new(host, pipeline);
        let server = BridgeServer::new(
            ListenEndpoint::new("127.0.0.1", 0),
            router,
            ui.clone(),
            reporter.clone(),
        );

        Self {
            _dir: dir,
            root,
            editor,
            provider,
            switcher,
            ui,
            reporter,
            server,
            addr: None,
            response: None,
        }
    }

    /// Workspace root the bridge serves.
    #[must_use]
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Writes a file into the workspace.
    pub fn write_file(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(path, contents).expect("write workspace file");
    }

    /// Starts the server and remembers its address.
    pub fn start(&mut self) {
        self.server.start().expect("start bridge");
        self.addr = self.server.local_addr();
    }

    /// Sends `payload` over a fresh connection and records the JSON answer.
    pub fn send(&mut self, payload: &str) {
        let addr = self.addr.expect("bridge should be running");
        let mut stream = TcpStream::connect(addr).expect("connect to bridge");
        stream
            .set_read_timeout(Some(IO_TIMEOUT))
            .expect("set read timeout");
        stream.write_all(payload.as_bytes()).expect("send request");
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).expect("read response");
        let response = serde_json::from_slice(&raw).expect("response should be JSON");
        self.response = Some(response);
    }

    /// The last recorded response.
    #[must_use]
    pub fn response(&self) -> &Value {
        self.response.as_ref().expect("no response recorded")
    }

    /// Waits until the UI has shown at least one prompt.
    #[must_use]
    pub fn wait_for_prompt(&self) -> bool {
        let deadline = Instant::now() + IO_TIMEOUT;
        while Instant::now() < deadline {
            if !self.ui.prompts().is_empty() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }
}

impl Drop for BridgeWorld {
    fn drop(&mut self) {
        if let Err(error) = self.server.stop() {
            drop(error);
        }
    }
}
