//! Deduplicated set of resolved model files

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A model file located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Canonical source path
    pub path: PathBuf,
    /// Name of the folder the file was found in (`checkpoints`, `loras`, ...)
    pub category: String,
    /// Size in bytes, read once at insertion
    pub size: u64,
}

impl ResolvedAsset {
    /// File name of the asset
    #[must_use]
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Resolved assets keyed by canonical path, in first-seen order
///
/// The same physical file reached through different reference strings, or
/// from different workflows, is stored once with the category of its first
/// sighting.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    assets: IndexMap<PathBuf, ResolvedAsset>,
}

impl ResolvedSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved file
    ///
    /// The category comes from the parent folder of `path` as given, the key
    /// from its canonical form. Returns `false` if the file was already known.
    pub fn insert_resolved(&mut self, path: &Path) -> bool {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.assets.contains_key(&canonical) {
            return false;
        }

        let category = category_of(path);
        let size = match fs::metadata(&canonical) {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!("Could not read size of {}: {}", canonical.display(), e);
                0
            }
        };

        tracing::debug!("Resolved {} [{}] ({} bytes)", canonical.display(), category, size);
        self.assets.insert(
            canonical.clone(),
            ResolvedAsset {
                path: canonical,
                category,
                size,
            },
        );
        true
    }

    /// Number of unique assets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if no assets were resolved
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by path (canonicalized first)
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&ResolvedAsset> {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.assets.get(&canonical)
    }

    /// Iterate assets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAsset> {
        self.assets.values()
    }

    /// Sum of asset sizes in bytes
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.assets.values().map(|a| a.size).sum()
    }

    /// Sum of asset sizes in GiB
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_size_gb(&self) -> f64 {
        self.total_size() as f64 / BYTES_PER_GIB
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a ResolvedAsset;
    type IntoIter = indexmap::map::Values<'a, PathBuf, ResolvedAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.values()
    }
}

fn category_of(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
