//! wfpack Workflow
//!
//! Discovery and reading of workflow documents.
//!
//! # Core Operations
//!
//! - **Scan**: [`scan_workflows`] collects every `.json` file under a root
//! - **Parse**: [`WorkflowDocument::read`] loads one document
//! - **Extract**: [`WorkflowDocument::references`] yields strings that look
//!   like model filenames
//!
//! # Example
//!
//! ```rust,ignore
//! use wfpack_workflow::{scan_workflows, WorkflowDocument};
//!
//! for path in scan_workflows(Path::new("user/default/workflows"))? {
//!     let doc = WorkflowDocument::read(&path)?;
//!     for reference in doc.references() {
//!         println!("{}: {}", path.display(), reference);
//!     }
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod extractor;
pub mod scanner;

pub use error::WorkflowError;
pub use extractor::{looks_like_model, WorkflowDocument, MODEL_EXTENSIONS};
pub use scanner::{is_workflow_file, scan_workflows, WORKFLOW_EXTENSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
