//! wfpack Guard
//!
//! Gatekeeper for every path the backup touches. A source or destination
//! path is accepted only when it lies inside one of the [`AllowedRoots`]:
//! the base directory of the install, plus any directories listed in an
//! optional `extra_paths.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use wfpack_guard::AllowedRoots;
//!
//! let roots = AllowedRoots::load("/opt/app", Some(Path::new("/opt/app/extra_paths.json")));
//! assert!(roots.is_allowed("output/workflow_backups"));
//! assert!(!roots.is_allowed("/etc"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod normalize;
mod roots;

pub use error::GuardError;
pub use normalize::{anchor, clean_input, normalize};
pub use roots::{AllowedRoots, ExtraPathsConfig, EXTRA_PATHS_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
