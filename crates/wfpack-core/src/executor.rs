//! Backup execution
//!
//! Destination layout:
//!
//! ```text
//! <dest>/workflows_backup/<workflow file name>
//! <dest>/models/<category>/<model file name>
//! ```
//!
//! Workflow copies are best-effort and fail silently: they can always be
//! taken again from the source folder. Model copy failures are logged as
//! warnings and the remaining models are still copied. A model whose file
//! name already exists in its category folder is skipped, which makes
//! re-running a backup cheap. Copies are staged as `<name>.partial` and
//! renamed into place, so an interrupted copy is never mistaken for a
//! finished one on the next run.

use crate::error::BackupError;
use crate::i18n::{render, Language, MessageKey};
use crate::progress::ProgressSink;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use wfpack_assets::{ResolvedAsset, ResolvedSet};

/// Subfolder receiving workflow documents
pub const WORKFLOWS_BACKUP_DIR: &str = "workflows_backup";

/// Subfolder receiving model files
pub const MODELS_BACKUP_DIR: &str = "models";

/// Counts from one execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Workflow documents copied
    pub workflows: usize,
    /// Models newly copied
    pub copied: usize,
    /// Models already present at the destination
    pub skipped: usize,
    /// Models that failed to copy
    pub failed: usize,
}

/// Copies workflows and resolved models into a destination folder
#[derive(Debug, Clone)]
pub struct BackupExecutor {
    destination: PathBuf,
    language: Language,
}

impl BackupExecutor {
    /// Create executor for a destination
    #[inline]
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            destination: destination.into(),
            language,
        }
    }

    /// Destination root
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Run the whole copy phase
    ///
    /// # Errors
    /// Returns [`BackupError::DestinationCreateFailed`] if the destination
    /// cannot be created; nothing is copied in that case. All other
    /// failures are absorbed into the summary.
    pub fn run(
        &self,
        workflows: &[PathBuf],
        assets: &ResolvedSet,
        progress: &mut dyn ProgressSink,
    ) -> Result<ExecutionSummary, BackupError> {
        self.prepare()?;

        let workflows = self.backup_workflows(workflows);
        let summary = self.backup_assets(assets, progress);

        tracing::info!(
            "Backup finished: {} workflows, {} copied, {} skipped, {} failed",
            workflows,
            summary.copied,
            summary.skipped,
            summary.failed
        );
        Ok(ExecutionSummary {
            workflows,
            ..summary
        })
    }

    /// Create the destination root if missing
    ///
    /// # Errors
    /// Returns [`BackupError::DestinationCreateFailed`]
    pub fn prepare(&self) -> Result<(), BackupError> {
        if self.destination.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.destination).map_err(|source| {
            BackupError::DestinationCreateFailed {
                path: self.destination.clone(),
                source,
            }
        })
    }

    /// Copy workflow documents, flattening them into one folder
    ///
    /// Existing copies are overwritten. Returns how many succeeded.
    pub fn backup_workflows(&self, workflows: &[PathBuf]) -> usize {
        let target_dir = self.destination.join(WORKFLOWS_BACKUP_DIR);
        if let Err(e) = fs::create_dir_all(&target_dir) {
            tracing::trace!("Cannot create {}: {}", target_dir.display(), e);
            return 0;
        }

        let mut copied = 0;
        for src in workflows {
            let Some(name) = src.file_name() else {
                continue;
            };
            match copy_preserving_times(src, &target_dir.join(name)) {
                Ok(()) => copied += 1,
                Err(source) => {
                    let err = BackupError::WorkflowCopy {
                        src: src.clone(),
                        source,
                    };
                    tracing::trace!("{}", err);
                }
            }
        }
        copied
    }

    /// Copy resolved models into their category folders
    pub fn backup_assets(
        &self,
        assets: &ResolvedSet,
        progress: &mut dyn ProgressSink,
    ) -> ExecutionSummary {
        let mut summary = ExecutionSummary::default();
        progress.start(assets.len());

        for asset in assets {
            match self.backup_asset(asset) {
                Ok(true) => {
                    summary.copied += 1;
                    progress.advance(1);
                }
                Ok(false) => {
                    summary.skipped += 1;
                    progress.advance(1);
                }
                Err(source) => {
                    summary.failed += 1;
                    let err = BackupError::AssetCopy {
                        src: asset.path.clone(),
                        source,
                    };
                    tracing::warn!("{}", err.message(self.language));
                }
            }
        }
        summary
    }

    /// Destination path for a model
    #[must_use]
    pub fn asset_target(&self, asset: &ResolvedAsset) -> Option<PathBuf> {
        let name = asset.file_name()?;
        Some(
            self.destination
                .join(MODELS_BACKUP_DIR)
                .join(&asset.category)
                .join(name),
        )
    }

    /// Returns `Ok(false)` when the target already exists
    fn backup_asset(&self, asset: &ResolvedAsset) -> io::Result<bool> {
        let target = self.asset_target(asset).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "asset path has no file name")
        })?;
        if let Some(folder) = target.parent() {
            fs::create_dir_all(folder)?;
        }
        if target.exists() {
            tracing::debug!("Already backed up: {}", target.display());
            return Ok(false);
        }

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!("{}", render(self.language, MessageKey::Copying, &[("name", name.as_str())]));

        copy_preserving_times(&asset.path, &target)?;
        Ok(true)
    }
}

/// Suffix of the sibling file a copy is staged in
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Copy contents, permissions and times through a staging sibling
///
/// `dst` only ever appears complete: the data lands in `<dst>.partial` and
/// is renamed into place once fully written. On failure the staging file
/// is removed. Timestamps are best-effort and only logged when they cannot
/// be carried over.
fn copy_preserving_times(src: &Path, dst: &Path) -> io::Result<()> {
    let partial = partial_path(dst);

    let staged = fs::copy(src, &partial).and_then(|_| {
        if let Err(e) = copy_times(src, &partial) {
            tracing::warn!("Could not preserve timestamps of {}: {}", dst.display(), e);
        }
        fs::rename(&partial, dst)
    });

    if staged.is_err() {
        if let Err(e) = fs::remove_file(&partial) {
            tracing::trace!("No staging file to clean up at {}: {}", partial.display(), e);
        }
    }
    staged
}

fn partial_path(dst: &Path) -> PathBuf {
    let mut name = dst.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    dst.with_file_name(name)
}

fn copy_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(dst)?.set_times(times)
}
