//! Errors raised while loading or validating the configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file passed to [`ConfigLoader::file`](super::ConfigLoader::file)
    /// does not exist.
    #[error("config file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// No enabled format handles the file extension.
    #[error("unsupported config format `.{extension}` for {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The merged sources do not fit the schema, e.g. an unknown log level.
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// A required value is empty.
    #[error("`{0}` must be set")]
    MissingField(&'static str),

    /// A value is present but unusable.
    #[error("`{field}` {reason}")]
    Invalid {
        /// Dotted key, e.g. `server.path`.
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
