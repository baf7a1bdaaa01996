//! Bridge bootstrap orchestration.
//!
//! Bootstrap loads configuration, installs telemetry and assembles the
//! production editor host: a [`LocalEditor`] over the configured workspace, an
//! [`EditorCliLauncher`] for workspace switches and a [`LoggingHostUi`]. The
//! resulting [`Bridge`] owns a stopped [`BridgeServer`].
//!
//! The local editor answers with [`NoCodeActions`] and keeps the startup root
//! after a workspace switch.

use std::env;
use std::io;
use std::sync::Arc;

use askcode_config::{Config, ConfigError};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::dispatch::{CodeActionPipeline, RequestRouter};
use crate::editor::{
    EditorCliLauncher, EditorHost, HostUi, LocalEditor, LoggingHostUi, NoCodeActions,
};
use crate::server::BridgeServer;
use crate::status::StatusReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Source of the bridge configuration.
pub trait ConfigLoader: Send + Sync {
    /// Loads the bridge configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`ConfigError`].
    fn load(&self) -> Result<Config, Arc<ConfigError>>;
}

/// Loader that reads the process arguments and environment through
/// [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<ConfigError>> {
        Config::load().map_err(Arc::new)
    }
}

/// Loader that returns a pre-resolved configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<ConfigError>> {
        Ok(self.config.clone())
    }
}

/// Reasons the bridge could not be assembled.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Flags, environment or validation rejected the configuration.
    #[error("invalid bridge configuration: {source}")]
    Configuration {
        /// Loader error, shared so reporters can keep it.
        #[source]
        source: Arc<ConfigError>,
    },
    /// The log subscriber could not be installed.
    #[error("failed to set up logging: {source}")]
    Telemetry {
        /// Telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// No workspace was configured and the current directory is unusable.
    #[error("cannot determine the workspace root: {source}")]
    WorkspaceRoot {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// A configured bridge whose server has not been started.
pub struct Bridge {
    config: Config,
    telemetry: TelemetryHandle,
    workspace: Utf8PathBuf,
    server: BridgeServer,
}

impl Bridge {
    /// Configuration the bridge was built from.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Proof that logging is installed.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Workspace root served by the local editor.
    #[must_use]
    pub fn workspace(&self) -> &Utf8Path {
        &self.workspace
    }

    /// The stopped server.
    pub const fn server_mut(&mut self) -> &mut BridgeServer {
        &mut self.server
    }

    /// Releases the server, dropping the rest.
    #[must_use]
    pub fn into_server(self) -> BridgeServer {
        self.server
    }
}

/// Bootstraps the bridge using the supplied collaborators.
///
/// # Errors
///
/// Returns a [`BootstrapError`] when configuration, telemetry or workspace
/// resolution fails; the failure is also reported to `reporter`. On success
/// `reporter` moves into the assembled server.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn StatusReporter>,
) -> Result<Bridge, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(loaded) => loaded,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let workspace = match resolve_workspace(&config) {
        Ok(root) => root,
        Err(source) => {
            let error = BootstrapError::WorkspaceRoot { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&config);
    let server = assemble_server(&config, &workspace, reporter);

    Ok(Bridge {
        config,
        telemetry,
        workspace,
        server,
    })
}

fn resolve_workspace(config: &Config) -> io::Result<Utf8PathBuf> {
    if let Some(workspace) = &config.workspace {
        return Ok(workspace.clone());
    }
    let current = env::current_dir()?;
    Utf8PathBuf::try_from(current).map_err(camino::FromPathBufError::into_io_error)
}

fn assemble_server(
    config: &Config,
    workspace: &Utf8Path,
    reporter: Arc<dyn StatusReporter>,
) -> BridgeServer {
    let ui: Arc<dyn HostUi> = Arc::new(LoggingHostUi::new(config.auto_switch_workspace));
    let editor = Arc::new(LocalEditor::new(workspace, Arc::new(NoCodeActions)));
    let switcher = Arc::new(EditorCliLauncher::new(
        config.editor_command.clone(),
        Arc::clone(&ui),
    ));
    let host = EditorHost::new(editor, switcher, Arc::clone(&ui));
    let pipeline = CodeActionPipeline::new(host.clone(), config.poll_settings());
    let router = RequestRouter::new(host, pipeline);
    BridgeServer::new(config.listen().clone(), router, ui, reporter)
}
