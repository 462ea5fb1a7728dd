use std::{ffi::OsString, path::PathBuf};

use thiserror::Error;

pub type DictResult<T> = Result<T, DictError>;

#[derive(Debug, Error)]
pub enum DictError {
    #[error("failed to access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad menu choice, blank required field, tab inside a field and similar.
    #[error("{0}")]
    InvalidInput(String),

    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("translation service error: {0}")]
    Translator(String),

    #[error("translation service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from translation service: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment variable '{key}' has malformed value {value:?}: {reason}")]
    MalformedEnvironmentVariable {
        key: String,
        value: OsString,
        reason: String,
    },
}

impl DictError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Errors a console flow reports and recovers from instead of
    /// ending the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DictError::InvalidInput(_)
                | DictError::UnsupportedLanguage(_)
                | DictError::Translator(_)
                | DictError::Http(_)
                | DictError::Json(_)
        )
    }
}
