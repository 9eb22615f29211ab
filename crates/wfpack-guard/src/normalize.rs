//! User-supplied path normalization
//!
//! Paths typed into a prompt or pasted from a file manager often carry
//! surrounding whitespace and quotes. They are cleaned, anchored to the base
//! directory when relative, then resolved component by component against
//! the filesystem. A destination which does not exist yet keeps its missing
//! tail, so it can still be compared against canonical roots.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Strip surrounding whitespace, then double quotes, then single quotes.
#[inline]
#[must_use]
pub fn clean_input(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

/// Join `raw` onto `base_dir` unless it is already absolute.
///
/// No folding or canonicalization happens here; this is the path the
/// backup actually reads from or writes to.
#[must_use]
pub fn anchor(raw: &str, base_dir: &Path) -> PathBuf {
    let cleaned = Path::new(clean_input(raw));
    if cleaned.is_absolute() {
        cleaned.to_path_buf()
    } else {
        base_dir.join(cleaned)
    }
}

/// Normalize a user-supplied path for comparison against allowed roots.
///
/// Returns `None` for input that is empty after cleaning. The result is the
/// path the filesystem would actually reach, so it is also the path to
/// read from or write to.
#[must_use]
pub fn normalize(raw: &str, base_dir: &Path) -> Option<PathBuf> {
    if clean_input(raw).is_empty() {
        return None;
    }
    Some(resolve_physical(&absolutize(&anchor(raw, base_dir))))
}

/// Normalize a directory that is already known to be a path (roots, base dir).
#[must_use]
pub fn normalize_dir(path: &Path) -> PathBuf {
    resolve_physical(&absolutize(path))
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Walk `path` one component at a time the way the OS does.
///
/// Each existing prefix is canonicalized before the next component is
/// applied, so a `..` after a symlink climbs out of the link's target, not
/// out of the link's parent. Components past the last existing one are
/// folded lexically. `..` at the root stays at the root.
#[must_use]
pub fn resolve_physical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => {
                out.push(name);
                if let Ok(real) = fs::canonicalize(&out) {
                    out = real;
                }
            }
        }
    }
    out
}
