//! Error types for allow-list loading

use std::path::PathBuf;

/// Errors while reading the allow-list configuration file
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON or does not match the expected shape
    #[error("invalid allow-list file {path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GuardError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create syntax error for path
    pub fn syntax_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Syntax {
            path: path.into(),
            source,
        }
    }
}
