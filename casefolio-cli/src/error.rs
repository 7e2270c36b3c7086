use thiserror::Error;

use casefolio_nav::NavError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Content directory could not be read or parsed
    #[error("Content error: {0}")]
    Content(String),

    /// Navigation replay failed
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),

    /// Serialization of exported data failed
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    pub(crate) fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    pub(crate) fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
