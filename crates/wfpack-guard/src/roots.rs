//! Allow-listed filesystem roots
//!
//! The base directory is always allowed. Additional roots come from an
//! optional `extra_paths.json` file:
//!
//! ```json
//! { "allowed_paths": ["/mnt/backup_drive", "/srv/workflows"] }
//! ```

use crate::error::GuardError;
use crate::normalize::{anchor, normalize, normalize_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Conventional name of the allow-list file
pub const EXTRA_PATHS_FILE: &str = "extra_paths.json";

/// On-disk allow-list configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPathsConfig {
    /// Additional absolute directories considered safe
    #[serde(default)]
    pub allowed_paths: Vec<PathBuf>,
}

impl ExtraPathsConfig {
    /// Parse configuration from JSON text
    ///
    /// # Errors
    /// Returns [`GuardError::Syntax`] if the text is not a valid allow-list
    pub fn from_json(path: &Path, content: &str) -> Result<Self, GuardError> {
        serde_json::from_str(content).map_err(|e| GuardError::syntax_error(path, e))
    }

    /// Read configuration from disk
    ///
    /// A missing file is not an error and yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn read(path: &Path) -> Result<Option<Self>, GuardError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_json(path, &content).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GuardError::io_error(path, e)),
        }
    }
}

/// Immutable set of directories user paths must fall under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoots {
    base_dir: PathBuf,
    roots: Vec<PathBuf>,
}

impl AllowedRoots {
    /// Roots containing only the base directory
    #[must_use]
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = normalize_dir(base_dir.as_ref());
        Self {
            roots: vec![base_dir.clone()],
            base_dir,
        }
    }

    /// Add a root if it exists on disk
    ///
    /// Relative roots are anchored to the base directory.
    #[must_use]
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let anchored = if root.is_absolute() {
            root.to_path_buf()
        } else {
            self.base_dir.join(root)
        };

        if anchored.exists() {
            let normalized = normalize_dir(&anchored);
            if !self.roots.contains(&normalized) {
                self.roots.push(normalized);
            }
        } else {
            tracing::debug!("Skipping allow-list entry that does not exist: {}", root.display());
        }
        self
    }

    /// Base directory plus every existing entry of the configuration file
    ///
    /// An unreadable or malformed file is reported as a warning and the
    /// result degrades to the base directory alone.
    #[must_use]
    pub fn load(base_dir: impl AsRef<Path>, config_file: Option<&Path>) -> Self {
        let mut roots = Self::new(base_dir);
        let Some(config_file) = config_file else {
            return roots;
        };

        match ExtraPathsConfig::read(config_file) {
            Ok(Some(config)) => {
                for path in &config.allowed_paths {
                    roots = roots.with_root(path);
                }
                tracing::info!(
                    "Loaded {} allowed roots from {}",
                    roots.roots.len(),
                    config_file.display()
                );
            }
            Ok(None) => {
                tracing::debug!("No allow-list file at {}", config_file.display());
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}", EXTRA_PATHS_FILE, e);
            }
        }
        roots
    }

    /// Base directory used to anchor relative paths
    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All allowed roots, base directory first
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Check whether a user-supplied path lies inside an allowed root
    ///
    /// Equality with a root counts as inside. Comparison is by whole path
    /// components, so `/data2` is not inside `/data`.
    #[must_use]
    pub fn is_allowed(&self, raw: &str) -> bool {
        let Some(path) = normalize(raw, &self.base_dir) else {
            return false;
        };
        self.roots.iter().any(|root| path.starts_with(root))
    }

    /// Concrete path for a user-supplied string
    ///
    /// This is the same normalized path [`is_allowed`](Self::is_allowed)
    /// checks, so symlinks and `..` cannot make the run touch a different
    /// location than the one that was approved.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> PathBuf {
        normalize(raw, &self.base_dir).unwrap_or_else(|| anchor(raw, &self.base_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("install");
        fs::create_dir_all(&base).unwrap();
        (dir, base)
    }

    #[test]
    fn base_dir_is_always_allowed() {
        let (_dir, base) = base();
        let roots = AllowedRoots::new(&base);

        assert_eq!(roots.roots().len(), 1);
        assert!(roots.is_allowed(base.to_str().unwrap()));
        assert!(roots.is_allowed("user/default/workflows"));
        assert!(roots.is_allowed("  \"output/workflow_backups\" "));
    }

    #[test]
    fn outside_paths_are_rejected() {
        let (dir, base) = base();
        let roots = AllowedRoots::new(&base);

        assert!(!roots.is_allowed(dir.path().to_str().unwrap()));
        assert!(!roots.is_allowed("../sibling"));
        assert!(!roots.is_allowed("output/../../escape"));
        assert!(!roots.is_allowed(""));
        assert!(!roots.is_allowed("\"\""));
    }

    #[test]
    fn sibling_prefix_is_not_descendant() {
        let (dir, base) = base();
        let sibling = dir.path().join("install2");
        fs::create_dir_all(&sibling).unwrap();
        let roots = AllowedRoots::new(&base);

        assert!(!roots.is_allowed(sibling.to_str().unwrap()));
    }

    #[test]
    fn config_adds_existing_roots_only() {
        let (dir, base) = base();
        let external = dir.path().join("external");
        fs::create_dir_all(&external).unwrap();
        let missing = dir.path().join("missing");

        let config = base.join(EXTRA_PATHS_FILE);
        let body = serde_json::json!({ "allowed_paths": [external, missing] });
        fs::write(&config, body.to_string()).unwrap();

        let roots = AllowedRoots::load(&base, Some(&config));
        assert_eq!(roots.roots().len(), 2);
        assert!(roots.is_allowed(external.join("backups").to_str().unwrap()));
        assert!(!roots.is_allowed(missing.to_str().unwrap()));
    }

    #[test]
    fn missing_config_degrades_to_base() {
        let (_dir, base) = base();
        let roots = AllowedRoots::load(&base, Some(&base.join(EXTRA_PATHS_FILE)));
        assert_eq!(roots.roots().len(), 1);
    }

    #[test]
    fn malformed_config_degrades_to_base() {
        let (_dir, base) = base();
        let config = base.join(EXTRA_PATHS_FILE);
        fs::write(&config, "{ allowed_paths: [").unwrap();

        let roots = AllowedRoots::load(&base, Some(&config));
        assert_eq!(roots.roots().len(), 1);
    }

    #[test]
    fn config_without_key_is_empty() {
        let config = ExtraPathsConfig::from_json(Path::new("x.json"), r#"{"other": 1}"#).unwrap();
        assert!(config.allowed_paths.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escape_is_rejected_and_resolves_to_target() {
        let (dir, base) = base();
        let outside = dir.path().join("outside").join("deep");
        fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, base.join("link")).unwrap();
        let roots = AllowedRoots::new(&base);

        assert!(!roots.is_allowed("link/../escape"));
        assert!(!roots.is_allowed("link"));
        assert!(!roots.resolve("link/../escape").starts_with(roots.base_dir()));
    }

    #[test]
    fn resolve_anchors_relative_input() {
        let (_dir, base) = base();
        let roots = AllowedRoots::new(&base);
        assert_eq!(
            roots.resolve("'output/backups'"),
            roots.base_dir().join("output/backups")
        );
    }
}
