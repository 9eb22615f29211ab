//! Testing utilities for wfpack workspace
//!
//! Shared fixtures that lay out a throwaway install directory:
//!
//! ```text
//! <tmp>/install/                 base directory
//! <tmp>/install/models/<cat>/    model files
//! <tmp>/install/user/workflows/  workflow documents
//! <tmp>/outside/                 a directory outside every allowed root
//! ```

#![allow(missing_docs)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WORKFLOWS_DIR: &str = "user/workflows";

pub struct InstallFixture {
    dir: TempDir,
    base: PathBuf,
}

impl InstallFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        // Canonical so assertions match paths produced by canonicalize().
        let root = fs::canonicalize(dir.path()).unwrap();
        let base = root.join("install");
        fs::create_dir_all(base.join("models")).unwrap();
        fs::create_dir_all(base.join(WORKFLOWS_DIR)).unwrap();
        fs::create_dir_all(root.join("outside")).unwrap();
        Self { dir, base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn models(&self) -> PathBuf {
        self.base.join("models")
    }

    pub fn workflows(&self) -> PathBuf {
        self.base.join(WORKFLOWS_DIR)
    }

    pub fn outside(&self) -> PathBuf {
        self.base.parent().unwrap().join("outside")
    }

    pub fn temp_root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a model file of `size` bytes at `models/<relative>`.
    pub fn add_model(&self, relative: &str, size: usize) -> PathBuf {
        let path = self.models().join(relative);
        write_bytes(&path, &vec![0xA5; size]);
        path
    }

    /// Write a workflow document at `user/workflows/<relative>`.
    pub fn add_workflow(&self, relative: &str, doc: &Value) -> PathBuf {
        let path = self.workflows().join(relative);
        write_bytes(&path, doc.to_string().as_bytes());
        path
    }

    /// Write raw text at `user/workflows/<relative>` (for malformed documents).
    pub fn add_raw_workflow(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.workflows().join(relative);
        write_bytes(&path, text.as_bytes());
        path
    }
}

impl Default for InstallFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_bytes(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// Editor-format workflow with one node per widget value.
pub fn editor_workflow(widget_values: &[&str]) -> Value {
    let nodes: Vec<Value> = widget_values
        .iter()
        .enumerate()
        .map(|(id, value)| {
            serde_json::json!({
                "id": id + 1,
                "type": "Loader",
                "widgets_values": [value],
            })
        })
        .collect();
    serde_json::json!({ "last_node_id": nodes.len(), "nodes": nodes })
}

/// API-format workflow (no `nodes` wrapper) with one input per value.
pub fn api_workflow(input_values: &[&str]) -> Value {
    let mut root = serde_json::Map::new();
    for (id, value) in input_values.iter().enumerate() {
        root.insert(
            (id + 1).to_string(),
            serde_json::json!({
                "class_type": "Loader",
                "inputs": { "name": value },
            }),
        );
    }
    Value::Object(root)
}

/// Every file under `root`, relative and sorted.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
