//! Test harness utilities shared by the unit and behavioural suites.

mod config_loader;
mod provider;
mod reporter;
mod shutdown;
mod ui;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use provider::ScriptedProvider;
pub use reporter::{RecordingStatusReporter, StatusEvent};
pub use shutdown::TestShutdownSignal;
pub use ui::{RecordingSwitcher, RecordingUi};
pub use world::{BridgeWorld, POLL_ATTEMPTS};
