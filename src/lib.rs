pub mod config;
pub mod error;
pub mod filesystem;
pub mod manifest;
pub mod models;
pub mod orchestrator;
pub mod status;
pub mod templates;
pub mod transform;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::Config;
pub use error::{PluginError, Result};
pub use filesystem::{FileSystem, OsFileSystem};
pub use models::{Diagnostic, DiagnosticLevel, ImportMatch, Report, Step, StepOutcome};
pub use orchestrator::Orchestrator;
