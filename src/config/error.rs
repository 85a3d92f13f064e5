//! Errors raised while reading or writing `config.yml`.

use std::path::PathBuf;

/// Ways loading or saving the configuration can fail.
///
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No config.yml location has been chosen")]
    FilePathNotSet,

    #[error("Cannot locate the home directory to place ~/.config/blueschema in")]
    HomeDirectoryNotFound,

    #[error("Cannot read config.yml at {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Cannot write config.yml at {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config directory, or the parent of the config file, could not be
    /// created.
    #[error("Cannot create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot encode settings as YAML: {0}")]
    SerializationFailed(String),

    #[error("config.yml is not valid: {0}")]
    DeserializationFailed(String),

    /// Accepted levels: off, error, warn, info, debug, trace.
    #[error("Unknown log_level '{0}'")]
    InvalidLogLevel(String),
}
