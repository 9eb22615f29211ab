//! wfpack Core
//!
//! Backs up the workflows of a node-graph install together with every
//! model file they reference.
//!
//! # Workflow
//!
//! 1. Check source and destination against the allow-list
//! 2. Scan the source folder for workflow documents
//! 3. Extract model references and resolve them under the models folder
//! 4. Summarize count and size
//! 5. In execute mode, copy workflows and models into the destination
//!
//! The result is always a localized report string; failures become lines
//! in it instead of errors returned to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use wfpack_core::{process_backup, BackupMode, Language};
//!
//! let report = process_backup(
//!     "user/default/workflows",
//!     "output/workflow_backups",
//!     BackupMode::AnalysisOnly,
//!     Language::English,
//!     Path::new("/opt/app"),
//! );
//! println!("{report}");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backup;
pub mod config;
pub mod error;
pub mod executor;
pub mod i18n;
pub mod progress;
pub mod report;

pub use backup::{process_backup, WorkflowBackup};
pub use config::{BackupConfig, BackupMode, MODELS_DIR};
pub use error::{BackupError, ConfigError};
pub use executor::{BackupExecutor, ExecutionSummary, MODELS_BACKUP_DIR, WORKFLOWS_BACKUP_DIR};
pub use i18n::{Language, MessageKey};
pub use progress::{CountingProgress, LogProgress, NoopProgress, ProgressSink};
pub use report::BackupReport;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running a backup
    pub use crate::{
        process_backup, BackupConfig, BackupMode, BackupReport, Language, ProgressSink,
        WorkflowBackup,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
