//! Reference-to-file resolution under a models root

use crate::set::ResolvedSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Maps model reference strings to files under a models root
///
/// Resolution order:
/// 1. The reference as a path relative to the models root, if that file exists
/// 2. The first file anywhere under the root with the same basename
///
/// The basename search walks directories in file-name order, so the winner
/// among several same-named files is the first one in a sorted depth-first
/// walk. It does not depend on filesystem enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    models_root: PathBuf,
}

impl AssetResolver {
    /// Create resolver for a models root
    #[inline]
    #[must_use]
    pub fn new(models_root: impl Into<PathBuf>) -> Self {
        Self {
            models_root: models_root.into(),
        }
    }

    /// Root directory searched for models
    #[inline]
    #[must_use]
    pub fn models_root(&self) -> &Path {
        &self.models_root
    }

    /// Resolve one reference to an existing file
    ///
    /// Both `/` and `\` separate components, since workflows saved on
    /// Windows store subfolders with backslashes. Absolute references and
    /// references that climb out with `..` skip the direct lookup and go
    /// straight to the basename search.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let fragment = split_reference(reference);

        if is_contained(&fragment) {
            let direct = self.models_root.join(&fragment);
            if direct.is_file() {
                return Some(direct);
            }
        }

        let name = fragment.file_name()?;
        self.find_by_name(name)
    }

    /// Resolve a reference and record it in `set`
    ///
    /// Returns `true` when the reference added a new asset. Unresolved
    /// references are dropped.
    pub fn resolve_into(&self, reference: &str, set: &mut ResolvedSet) -> bool {
        match self.resolve(reference) {
            Some(path) => set.insert_resolved(&path),
            None => {
                tracing::debug!("Unresolved model reference: {}", reference);
                false
            }
        }
    }

    fn find_by_name(&self, name: &OsStr) -> Option<PathBuf> {
        WalkDir::new(&self.models_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .find(|entry| entry.file_name() == name && entry.path().is_file())
            .map(DirEntry::into_path)
    }
}

/// Rebuild a reference string as a path, treating `\` as a separator too.
fn split_reference(reference: &str) -> PathBuf {
    let mut path = PathBuf::new();
    if reference.starts_with('/') {
        path.push("/");
    }
    for part in reference.split(['/', '\\']).filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path
}

fn is_contained(fragment: &Path) -> bool {
    fragment
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
