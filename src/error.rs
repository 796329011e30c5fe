use thiserror::Error;

pub type Result<T> = std::result::Result<T, PluginError>;

#[derive(Error, Debug)]
pub enum PluginError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Fatal: the generation pass stops before touching any file
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&str> for PluginError {
    fn from(msg: &str) -> Self {
        PluginError::Internal(msg.to_string())
    }
}

impl From<String> for PluginError {
    fn from(msg: String) -> Self {
        PluginError::Internal(msg)
    }
}

impl From<config::ConfigError> for PluginError {
    fn from(err: config::ConfigError) -> Self {
        PluginError::Configuration(err.to_string())
    }
}

impl From<walkdir::Error> for PluginError {
    fn from(err: walkdir::Error) -> Self {
        PluginError::Template(err.to_string())
    }
}

impl PluginError {
    /// Whether this error must abort the whole generation pass
    pub fn is_fatal(&self) -> bool {
        matches!(self, PluginError::Precondition(_))
    }
}
