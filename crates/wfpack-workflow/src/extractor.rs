//! Model reference extraction
//!
//! Workflow exports come in more than one shape. The editor format wraps
//! its nodes in a `nodes` array:
//!
//! ```json
//! { "nodes": [ { "type": "CheckpointLoader", "widgets_values": ["sd15.safetensors"] } ] }
//! ```
//!
//! The API format drops the wrapper and keys nodes by id:
//!
//! ```json
//! { "4": { "class_type": "CheckpointLoader", "inputs": { "ckpt_name": "sd15.safetensors" } } }
//! ```
//!
//! Both are read through [`WorkflowDocument`], which only ever looks at
//! `widgets_values` arrays and `inputs` objects and keeps string values that
//! mention a model file extension.

use crate::error::WorkflowError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Recognized model file extensions, matched as lowercase substrings
pub const MODEL_EXTENSIONS: &[&str] = &[".safetensors", ".pt", ".pth", ".ckpt", ".bin"];

/// Check whether a string mentions a model file extension anywhere
///
/// This is a substring test, not a suffix test: `"model.ckpt [hash]"`
/// qualifies.
#[inline]
#[must_use]
pub fn looks_like_model(value: &str) -> bool {
    let lower = value.to_lowercase();
    MODEL_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// Parsed workflow document
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDocument {
    root: Value,
}

impl WorkflowDocument {
    /// Wrap an already-parsed JSON value
    #[inline]
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Read and parse a document from disk
    ///
    /// # Errors
    /// Returns [`WorkflowError::Io`] or [`WorkflowError::Syntax`] naming the file
    pub fn read(path: &Path) -> Result<Self, WorkflowError> {
        let content = fs::read_to_string(path).map_err(|e| WorkflowError::io_error(path, e))?;
        serde_json::from_str(&content)
            .map(Self::new)
            .map_err(|e| WorkflowError::syntax_error(path, e))
    }

    /// Root JSON value
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Node records of the document
    ///
    /// Uses the `nodes` array when it is present and non-empty. When `nodes`
    /// is absent or blank (`null`, `false`, `0`, `""`, `[]`, `{}`) and the
    /// root is an object, the root's values are the nodes instead. Any other
    /// non-array `nodes` yields nothing. Entries that are not objects are
    /// skipped.
    pub fn nodes(&self) -> impl Iterator<Item = &Map<String, Value>> + '_ {
        let nodes_field = self.root.get("nodes");
        let use_fallback = nodes_field.map_or(true, is_blank);

        let listed = nodes_field.and_then(Value::as_array).into_iter().flatten();
        let fallback = self
            .root
            .as_object()
            .filter(|_| use_fallback)
            .into_iter()
            .flat_map(Map::values);

        listed.chain(fallback).filter_map(Value::as_object)
    }

    /// Candidate model references, in document order
    ///
    /// Collects every element of each node's `widgets_values` array and every
    /// value of its `inputs` object, then keeps strings passing
    /// [`looks_like_model`]. Duplicates are not removed.
    pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes()
            .flat_map(node_values)
            .filter_map(Value::as_str)
            .filter(|candidate| looks_like_model(candidate))
    }
}

impl FromStr for WorkflowDocument {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(Self::new)
    }
}

/// Values a loosely typed reader treats as "no value".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn node_values(node: &Map<String, Value>) -> impl Iterator<Item = &Value> + '_ {
    let widgets = node
        .get("widgets_values")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    let inputs = node
        .get("inputs")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(Map::values);
    widgets.chain(inputs)
}
