//! Error types for wfpack Core
//!
//! Every [`BackupError`] is turned into a report line rather than being
//! returned to the caller:
//! - Terminal: `SecurityRejected`, `PathNotFound`, `NoWorkflowsFound`,
//!   `DestinationCreateFailed` (execute phase only)
//! - Recovered: `DocumentRead` (one report line), `AssetCopy` (console
//!   warning), `WorkflowCopy` (silent)

use crate::i18n::{render, Language, MessageKey};
use std::path::{Path, PathBuf};
use wfpack_workflow::WorkflowError;

/// Errors raised during a backup run
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// Path lies outside every allowed root
    #[error("path not allowed: {path}")]
    SecurityRejected { path: String },

    /// Workflow folder does not exist
    #[error("workflow folder does not exist: {path}")]
    PathNotFound { path: String },

    /// Workflow folder holds no documents
    #[error("no workflow documents in {path}")]
    NoWorkflowsFound { path: String },

    /// One workflow document could not be read or parsed
    #[error("error reading {file}: {reason}")]
    DocumentRead { file: String, reason: String },

    /// Backup destination could not be created
    #[error("cannot create destination {path}: {source}")]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A model file failed to copy
    #[error("error copying {src}: {source}")]
    AssetCopy {
        src: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A workflow file failed to copy
    #[error("error copying workflow {src}: {source}")]
    WorkflowCopy {
        src: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackupError {
    /// Map a scan failure, keeping the path as the user typed it
    #[must_use]
    pub fn from_scan(error: WorkflowError, user_path: &str) -> Self {
        match error {
            WorkflowError::PathNotFound { .. } => Self::PathNotFound {
                path: user_path.to_string(),
            },
            WorkflowError::NoWorkflowsFound { .. } => Self::NoWorkflowsFound {
                path: user_path.to_string(),
            },
            other => Self::document_read(other.path(), &other),
        }
    }

    /// Create document read error naming only the file
    #[must_use]
    pub fn document_read(path: &Path, error: &WorkflowError) -> Self {
        let file = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::DocumentRead {
            file,
            reason: error.reason(),
        }
    }

    /// Check if error ends the run
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SecurityRejected { .. }
                | Self::PathNotFound { .. }
                | Self::NoWorkflowsFound { .. }
                | Self::DestinationCreateFailed { .. }
        )
    }

    /// Localized report line for this error
    #[must_use]
    pub fn message(&self, language: Language) -> String {
        match self {
            Self::SecurityRejected { path } => {
                render(language, MessageKey::ErrSecurity, &[("path", path.as_str())])
            }
            Self::PathNotFound { path } => {
                render(language, MessageKey::ErrPath, &[("path", path.as_str())])
            }
            Self::NoWorkflowsFound { path } => {
                render(language, MessageKey::ErrNoJson, &[("path", path.as_str())])
            }
            Self::DocumentRead { file, reason } => render(
                language,
                MessageKey::ErrRead,
                &[("file", file.as_str()), ("error", reason.as_str())],
            ),
            Self::DestinationCreateFailed { path, .. } => {
                let path = path.display().to_string();
                render(language, MessageKey::ErrDest, &[("path", path.as_str())])
            }
            Self::AssetCopy { src, source } | Self::WorkflowCopy { src, source } => {
                let src = src.display().to_string();
                let error = source.to_string();
                render(
                    language,
                    MessageKey::ErrCopy,
                    &[("src", src.as_str()), ("error", error.as_str())],
                )
            }
        }
    }
}

/// Invalid invocation parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Mode is neither `ANALYSIS_ONLY` nor `EXECUTE_BACKUP`
    #[error("unknown mode '{0}' (expected ANALYSIS_ONLY or EXECUTE_BACKUP)")]
    UnknownMode(String),

    /// Language outside the catalog
    #[error("unsupported language '{0}' (expected English or Spanish)")]
    UnknownLanguage(String),
}
