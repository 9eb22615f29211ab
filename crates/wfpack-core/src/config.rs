//! Run configuration
//!
//! The base directory is the install root every relative path is anchored
//! to. It is passed in explicitly; nothing here reads process-wide state.

use crate::error::ConfigError;
use crate::i18n::Language;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wfpack_guard::EXTRA_PATHS_FILE;

/// Models folder name under the base directory
pub const MODELS_DIR: &str = "models";

/// Whether the run copies anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackupMode {
    /// Report what would be copied; touch nothing
    #[default]
    AnalysisOnly,
    /// Copy workflows and models into the destination
    ExecuteBackup,
}

impl BackupMode {
    /// Canonical identifier (`ANALYSIS_ONLY`, `EXECUTE_BACKUP`)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnalysisOnly => "ANALYSIS_ONLY",
            Self::ExecuteBackup => "EXECUTE_BACKUP",
        }
    }

    /// Check if the run copies files
    #[inline]
    #[must_use]
    pub fn is_execute(self) -> bool {
        matches!(self, Self::ExecuteBackup)
    }
}

impl Display for BackupMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ANALYSIS_ONLY" | "ANALYSIS" => Ok(Self::AnalysisOnly),
            "EXECUTE_BACKUP" | "EXECUTE" => Ok(Self::ExecuteBackup),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Backup run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    /// Install root; always allowed, anchors relative paths
    pub base_dir: PathBuf,
    /// Root searched for model files
    pub models_dir: PathBuf,
    /// Optional allow-list file
    pub extra_paths_file: Option<PathBuf>,
    /// Report language
    pub language: Language,
    /// Analysis or copy
    pub mode: BackupMode,
}

impl BackupConfig {
    /// Defaults for an install rooted at `base_dir`
    ///
    /// Models are expected in `<base_dir>/models`, the allow-list in
    /// `<base_dir>/extra_paths.json`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            models_dir: base_dir.join(MODELS_DIR),
            extra_paths_file: Some(base_dir.join(EXTRA_PATHS_FILE)),
            language: Language::default(),
            mode: BackupMode::default(),
            base_dir,
        }
    }

    /// With models directory
    #[inline]
    #[must_use]
    pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
        self.models_dir = models_dir.into();
        self
    }

    /// With allow-list file (`None` disables extra roots)
    #[inline]
    #[must_use]
    pub fn with_extra_paths_file(mut self, file: Option<PathBuf>) -> Self {
        self.extra_paths_file = file;
        self
    }

    /// With report language
    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// With mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: BackupMode) -> Self {
        self.mode = mode;
        self
    }

    /// Base directory
    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
