//! Error types for workflow scanning and parsing

use std::path::{Path, PathBuf};

/// Errors raised while locating or reading workflow documents
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Workflow root directory does not exist
    #[error("workflow directory does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Root exists but holds no `.json` documents
    #[error("no workflow documents found in {path}")]
    NoWorkflowsFound { path: PathBuf },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("syntax error in {path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkflowError {
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

    /// Path the error refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PathNotFound { path }
            | Self::NoWorkflowsFound { path }
            | Self::Io { path, .. }
            | Self::Syntax { path, .. } => path,
        }
    }

    /// Underlying cause without the path prefix
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Io { source, .. } => source.to_string(),
            Self::Syntax { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}
