//! File-based design-source collaborator.
//!
//! Resolves `(file_key, node_id)` pairs against locally downloaded Figma API
//! exports instead of the live HTTP API. Two export shapes are accepted:
//!
//! 1. nodes-endpoint body: `{ "nodes": { "<id>": { "document": {...} } } }`
//! 2. whole-file body: `{ "document": {...} }` (or a bare node), searched
//!    recursively by `id`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schema::DesignNode;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no export found for file key {file_key:?} (looked for {path:?})")]
    ExportNotFound { file_key: String, path: PathBuf },
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse export {path:?}: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("node {node_id} not found in file {file_key}")]
    NodeNotFound { node_id: String, file_key: String },
}

/// The design-source interface of the core: everything upstream of the
/// normalizer goes through this.
pub trait NodeSource {
    fn fetch_node_document(&self, file_key: &str, node_id: &str)
    -> Result<DesignNode, SourceError>;
}

/// Directory of downloaded exports, one `<fileKey>.json` per design file.
pub struct ExportDirSource {
    root: PathBuf,
}

impl ExportDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl NodeSource for ExportDirSource {
    fn fetch_node_document(
        &self,
        file_key: &str,
        node_id: &str,
    ) -> Result<DesignNode, SourceError> {
        let path = self.root.join(format!("{file_key}.json"));
        if !path.is_file() {
            return Err(SourceError::ExportNotFound { file_key: file_key.to_owned(), path });
        }
        let raw = fs::read_to_string(&path)?;
        resolve_node(&path, &raw, file_key, node_id)
    }
}

#[derive(Debug, Deserialize)]
struct NodesExport {
    nodes: BTreeMap<String, NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: Option<DesignNode>,
}

#[derive(Debug, Deserialize)]
struct FileExport {
    document: DesignNode,
}

/// Pull the document for `node_id` out of an export body.
fn resolve_node(
    path: &Path,
    raw: &str,
    file_key: &str,
    node_id: &str,
) -> Result<DesignNode, SourceError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| SourceError::Parse {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    let not_found = || SourceError::NodeNotFound {
        node_id: node_id.to_owned(),
        file_key: file_key.to_owned(),
    };

    if value.get("nodes").is_some() {
        let mut export: NodesExport = deserialize_with_path(path, value)?;
        return export
            .nodes
            .remove(node_id)
            .and_then(|entry| entry.document)
            .ok_or_else(not_found);
    }

    let root = if value.get("document").is_some() {
        deserialize_with_path::<FileExport>(path, value)?.document
    } else {
        deserialize_with_path::<DesignNode>(path, value)?
    };
    find_by_id(&root, node_id).cloned().ok_or_else(not_found)
}

/// Deserialize with JSON-path context in error messages.
fn deserialize_with_path<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, SourceError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let json_path = err.path().to_string();
        SourceError::Parse {
            path: path.to_path_buf(),
            detail: format!("at JSON path {json_path}: {}", err.into_inner()),
        }
    })
}

fn find_by_id<'a>(node: &'a DesignNode, node_id: &str) -> Option<&'a DesignNode> {
    if node.id.as_deref() == Some(node_id) {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_by_id(child, node_id))
}

// ------------------------------- Tests ------------------------------------ //
