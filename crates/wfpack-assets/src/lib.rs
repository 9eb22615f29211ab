//! wfpack Assets
//!
//! Turns model reference strings into a deduplicated, categorized list of
//! files under a models root.
//!
//! # Core Concepts
//!
//! - [`AssetResolver`]: direct-path lookup, then basename search
//! - [`ResolvedSet`]: unique files keyed by canonical path
//! - [`ResolvedAsset`]: path, category (parent folder name) and size
//!
//! # Example
//!
//! ```rust,ignore
//! use wfpack_assets::{AssetResolver, ResolvedSet};
//!
//! let resolver = AssetResolver::new("/opt/app/models");
//! let mut set = ResolvedSet::new();
//! resolver.resolve_into("checkpoints/sd15.safetensors", &mut set);
//! resolver.resolve_into("sd15.safetensors", &mut set);
//! assert_eq!(set.len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod resolver;
mod set;

pub use resolver::AssetResolver;
pub use set::{ResolvedAsset, ResolvedSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
