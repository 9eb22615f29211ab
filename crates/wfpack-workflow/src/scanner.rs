//! Workflow discovery
//!
//! Recursively collects every `.json` file under a root directory.

use crate::error::WorkflowError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of workflow documents (without dot)
pub const WORKFLOW_EXTENSION: &str = "json";

/// Check whether a path names a workflow document
#[inline]
#[must_use]
pub fn is_workflow_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKFLOW_EXTENSION))
}

/// Collect all workflow documents under `root`, sorted by path
///
/// Unreadable subdirectories are skipped.
///
/// # Errors
/// - [`WorkflowError::PathNotFound`] if `root` does not exist
/// - [`WorkflowError::NoWorkflowsFound`] if nothing matched
pub fn scan_workflows(root: &Path) -> Result<Vec<PathBuf>, WorkflowError> {
    if !root.exists() {
        return Err(WorkflowError::PathNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_workflow_file(path) && path.is_file())
        .collect();

    if found.is_empty() {
        return Err(WorkflowError::NoWorkflowsFound {
            path: root.to_path_buf(),
        });
    }

    found.sort();
    tracing::debug!("Found {} workflow documents under {}", found.len(), root.display());
    Ok(found)
}
