//! Backup orchestration
//!
//! ```text
//! authorize paths → scan workflows → extract + resolve references
//!                 → summarize → (execute) copy → report
//! ```
//!
//! Every outcome, including rejection and missing folders, ends as a
//! rendered report string.

use crate::config::{BackupConfig, BackupMode};
use crate::error::BackupError;
use crate::executor::BackupExecutor;
use crate::i18n::{Language, MessageKey};
use crate::progress::{NoopProgress, ProgressSink};
use crate::report::BackupReport;
use std::path::{Path, PathBuf};
use wfpack_assets::{AssetResolver, ResolvedSet};
use wfpack_guard::AllowedRoots;
use wfpack_workflow::{scan_workflows, WorkflowDocument};

/// One configured backup tool instance
#[derive(Debug, Clone)]
pub struct WorkflowBackup {
    config: BackupConfig,
    roots: AllowedRoots,
    resolver: AssetResolver,
}

impl WorkflowBackup {
    /// Create from configuration, loading the allow-list once
    #[must_use]
    pub fn new(config: BackupConfig) -> Self {
        let roots = AllowedRoots::load(&config.base_dir, config.extra_paths_file.as_deref());
        Self::with_roots(config, roots)
    }

    /// Create with an explicit allow-list
    #[must_use]
    pub fn with_roots(config: BackupConfig, roots: AllowedRoots) -> Self {
        let resolver = AssetResolver::new(config.models_dir.clone());
        Self {
            config,
            roots,
            resolver,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    /// Active allow-list
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &AllowedRoots {
        &self.roots
    }

    /// Run and render the report
    pub fn process_backup(
        &self,
        workflows_path: &str,
        backup_destination: &str,
        progress: &mut dyn ProgressSink,
    ) -> String {
        self.run(workflows_path, backup_destination, progress).render()
    }

    /// Run and return the structured report
    pub fn run(
        &self,
        workflows_path: &str,
        backup_destination: &str,
        progress: &mut dyn ProgressSink,
    ) -> BackupReport {
        let language = self.config.language;

        for raw in [workflows_path, backup_destination] {
            if !self.roots.is_allowed(raw) {
                tracing::warn!("Rejected path outside allowed roots: {}", raw);
                let err = BackupError::SecurityRejected {
                    path: raw.to_string(),
                };
                return BackupReport::failed(language, &err);
            }
        }

        let source = self.roots.resolve(workflows_path);
        let destination = self.roots.resolve(backup_destination);

        let workflows = match scan_workflows(&source) {
            Ok(found) => found,
            Err(e) => {
                tracing::info!("Nothing to analyze: {}", e);
                return BackupReport::failed(language, &BackupError::from_scan(e, workflows_path));
            }
        };

        let mut report = BackupReport::new(language);
        let count = workflows.len().to_string();
        let shown = source.display().to_string();
        report.push_msg(
            MessageKey::Analyzing,
            &[("count", count.as_str()), ("path", shown.as_str())],
        );
        tracing::info!("Analyzing {} workflows in {}", workflows.len(), source.display());

        let assets = self.analyze(&workflows, &mut report);
        let found = assets.len().to_string();
        let size = format!("{:.2}", assets.total_size_gb());
        report.push_msg(MessageKey::Found, &[("count", found.as_str())]);
        report.push_msg(MessageKey::Size, &[("size", size.as_str())]);

        match self.config.mode {
            BackupMode::ExecuteBackup => {
                self.execute(&destination, &workflows, &assets, progress, &mut report);
            }
            BackupMode::AnalysisOnly => report.push_msg(MessageKey::AnalysisMode, &[]),
        }
        report
    }

    /// Build the deduplicated model set for a list of workflow files
    ///
    /// Unreadable documents add one report line each and are skipped.
    pub fn analyze(&self, workflows: &[PathBuf], report: &mut BackupReport) -> ResolvedSet {
        let mut assets = ResolvedSet::new();

        for path in workflows {
            match WorkflowDocument::read(path) {
                Ok(doc) => {
                    for reference in doc.references() {
                        self.resolver.resolve_into(reference, &mut assets);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping workflow: {}", e);
                    report.push_error(&BackupError::document_read(path, &e));
                }
            }
        }

        tracing::info!(
            "Resolved {} unique models ({} bytes)",
            assets.len(),
            assets.total_size()
        );
        assets
    }

    fn execute(
        &self,
        destination: &Path,
        workflows: &[PathBuf],
        assets: &ResolvedSet,
        progress: &mut dyn ProgressSink,
        report: &mut BackupReport,
    ) {
        let executor = BackupExecutor::new(destination, self.config.language);
        match executor.run(workflows, assets, progress) {
            Ok(summary) => {
                let copied = summary.copied.to_string();
                let shown = destination.display().to_string();
                report.push_msg(MessageKey::Done, &[("count", copied.as_str())]);
                report.push_msg(MessageKey::Location, &[("path", shown.as_str())]);
            }
            Err(e) => {
                tracing::error!("{}", e);
                report.push_error(&e);
            }
        }
    }
}

/// One-shot entry point
///
/// Loads `<base_dir>/extra_paths.json` if present, searches
/// `<base_dir>/models`, and discards progress updates.
#[must_use]
pub fn process_backup(
    workflows_path: &str,
    backup_destination: &str,
    mode: BackupMode,
    language: Language,
    base_dir: &Path,
) -> String {
    let config = BackupConfig::new(base_dir)
        .with_mode(mode)
        .with_language(language);
    WorkflowBackup::new(config).process_backup(workflows_path, backup_destination, &mut NoopProgress)
}
