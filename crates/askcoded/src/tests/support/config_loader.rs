//! Test configuration loaders for scenarios covering success and failure paths.

use std::sync::Arc;

use askcode_config::{Config, ConfigError, ListenEndpoint};
use camino::Utf8PathBuf;
use tempfile::TempDir;

use crate::bootstrap::ConfigLoader;

/// Loader that serves a temporary workspace on an ephemeral loopback port.
pub struct TestConfigLoader {
    _dir: TempDir,
    workspace: Utf8PathBuf,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary workspace");
        let workspace = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temporary workspace path was not valid UTF-8");
        Self {
            _dir: dir,
            workspace,
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<ConfigError>> {
        Ok(Config {
            listen: ListenEndpoint::new("127.0.0.1", 0),
            workspace: Some(self.workspace.clone()),
            settle_delay_ms: 0,
            poll_attempts: 2,
            poll_interval_ms: 5,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by asking for a wildcard listen address.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<ConfigError>> {
        Config::load_from_iter(["askcoded", "--listen", "tcp://0.0.0.0:5004"]).map_err(Arc::new)
    }
}
