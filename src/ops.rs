//! Dispatch-layer operations: metadata, widget tree, export.
//!
//! Pure request/response transforms over a [`NodeSource`]. Input validation
//! happens before any source access; the only core-raised failure past that
//! point is the normalizer's unsupported-root error.

use serde::{Deserialize, Serialize};

use crate::codegen;
use crate::ir::WidgetNode;
use crate::name;
use crate::normalize::{self, NormalizeError};
use crate::schema::{BoundingBox, DesignNode};
use crate::source::{NodeSource, SourceError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRequest {
    pub node_id: String,
    #[serde(default)]
    pub file_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("nodeId is required")]
    MissingNodeId,
    #[error("no file key given and no default is configured")]
    MissingFileKey,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub node_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub absolute_bounding_box: Option<BoundingBox>,
    pub children_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTreeResponse {
    pub node_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub tree: WidgetNode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub node_id: String,
    pub class_name: String,
    pub file_name: String,
    pub code: String,
    pub tree: WidgetNode,
}

/// The three operations, bound to a source and a process-wide default
/// file key.
pub struct Operations<'a> {
    source: &'a dyn NodeSource,
    default_file_key: Option<String>,
}

impl<'a> Operations<'a> {
    pub fn new(source: &'a dyn NodeSource, default_file_key: Option<String>) -> Self {
        Self { source, default_file_key }
    }

    /// Raw-document metadata; no normalization involved.
    pub fn get_metadata(&self, request: &NodeRequest) -> Result<MetadataResponse, OpError> {
        let document = self.fetch(request)?;
        Ok(MetadataResponse {
            node_id: request.node_id.clone(),
            name: document.name.clone(),
            node_type: document.tag.clone(),
            absolute_bounding_box: document.absolute_bounding_box,
            children_count: document.children.len(),
        })
    }

    /// Normalized widget tree for a node.
    pub fn get_widget_tree(&self, request: &NodeRequest) -> Result<WidgetTreeResponse, OpError> {
        let document = self.fetch(request)?;
        let tree = normalize::build_widget_tree(&document)?;
        Ok(WidgetTreeResponse {
            node_id: request.node_id.clone(),
            name: document.name.clone(),
            node_type: document.tag.clone(),
            tree,
        })
    }

    /// Full export: tree, derived names, and generated Dart source.
    pub fn export_widget(&self, request: &NodeRequest) -> Result<ExportResponse, OpError> {
        let document = self.fetch(request)?;
        let tree = normalize::build_widget_tree(&document)?;
        let class_name = name::class_name(document.name.as_deref());
        let code = codegen::generate_widget(&class_name, &tree);
        Ok(ExportResponse {
            node_id: request.node_id.clone(),
            file_name: name::file_name(&class_name),
            class_name,
            code,
            tree,
        })
    }

    fn fetch(&self, request: &NodeRequest) -> Result<DesignNode, OpError> {
        if request.node_id.trim().is_empty() {
            return Err(OpError::MissingNodeId);
        }
        let file_key = request
            .file_key
            .as_deref()
            .or(self.default_file_key.as_deref())
            .ok_or(OpError::MissingFileKey)?;
        Ok(self.source.fetch_node_document(file_key, &request.node_id)?)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source holding a single document.
    struct StaticSource {
        document: DesignNode,
    }

    impl StaticSource {
        fn from_json(value: serde_json::Value) -> Self {
            Self { document: serde_json::from_value(value).unwrap() }
        }
    }

    impl NodeSource for StaticSource {
        fn fetch_node_document(
            &self,
            file_key: &str,
            node_id: &str,
        ) -> Result<DesignNode, SourceError> {
            if self.document.id.as_deref() == Some(node_id) {
                Ok(self.document.clone())
            } else {
                Err(SourceError::NodeNotFound {
                    node_id: node_id.to_owned(),
                    file_key: file_key.to_owned(),
                })
            }
        }
    }

    fn card_source() -> StaticSource {
        StaticSource::from_json(serde_json::json!({
            "id": "1:2",
            "name": "Card",
            "type": "FRAME",
            "layoutMode": "VERTICAL",
            "itemSpacing": 8,
            "absoluteBoundingBox": { "x": 0, "y": 0, "width": 320, "height": 200 },
            "children": [
                { "type": "TEXT", "characters": "A" },
                { "type": "TEXT", "characters": "B" }
            ]
        }))
    }

    fn request(node_id: &str) -> NodeRequest {
        NodeRequest { node_id: node_id.to_owned(), file_key: Some("KEY".to_owned()) }
    }

    #[test]
    fn empty_node_id_fails_before_source_access() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let err = ops.get_metadata(&request("  ")).unwrap_err();
        assert!(matches!(err, OpError::MissingNodeId));
    }

    #[test]
    fn missing_file_key_without_default_fails() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let req = NodeRequest { node_id: "1:2".to_owned(), file_key: None };
        assert!(matches!(ops.get_metadata(&req).unwrap_err(), OpError::MissingFileKey));
    }

    #[test]
    fn default_file_key_fills_in_when_request_omits_it() {
        let source = card_source();
        let ops = Operations::new(&source, Some("DEFAULT".to_owned()));
        let req = NodeRequest { node_id: "1:2".to_owned(), file_key: None };
        assert!(ops.get_metadata(&req).is_ok());
    }

    #[test]
    fn metadata_reports_raw_document_facts() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let meta = ops.get_metadata(&request("1:2")).unwrap();
        assert_eq!(meta.node_id, "1:2");
        assert_eq!(meta.name.as_deref(), Some("Card"));
        assert_eq!(meta.node_type, "FRAME");
        assert_eq!(meta.children_count, 2);
        assert_eq!(meta.absolute_bounding_box.unwrap().width, Some(320.0));
    }

    #[test]
    fn unknown_node_surfaces_upstream_not_found() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let err = ops.get_widget_tree(&request("9:9")).unwrap_err();
        assert!(matches!(err, OpError::Source(SourceError::NodeNotFound { .. })));
    }

    #[test]
    fn widget_tree_response_carries_the_normalized_tree() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let response = ops.get_widget_tree(&request("1:2")).unwrap();
        assert_eq!(response.node_type, "FRAME");
        let tree = serde_json::to_value(&response.tree).unwrap();
        assert_eq!(tree["type"], "column");
        assert_eq!(tree["props"]["spacing"], 8.0);
        assert_eq!(tree["children"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn export_generates_card_widget_end_to_end() {
        let source = card_source();
        let ops = Operations::new(&source, None);
        let export = ops.export_widget(&request("1:2")).unwrap();
        assert_eq!(export.class_name, "CardWidget");
        assert_eq!(export.file_name, "card_widget.dart");
        assert!(export.code.contains("class CardWidget extends StatelessWidget"));
        // One spacer of magnitude 8 sits between the two texts.
        assert_eq!(export.code.matches("SizedBox(height: 8)").count(), 1);
        let a = export.code.find("Text('A')").unwrap();
        let gap = export.code.find("SizedBox(height: 8)").unwrap();
        let b = export.code.find("Text('B')").unwrap();
        assert!(a < gap && gap < b);
    }

    #[test]
    fn unsupported_root_propagates_from_normalization() {
        let source = StaticSource::from_json(serde_json::json!({ "id": "1:2", "type": "SLICE" }));
        let ops = Operations::new(&source, None);
        let err = ops.export_widget(&request("1:2")).unwrap_err();
        assert!(matches!(err, OpError::Normalize(NormalizeError::UnsupportedRoot { .. })));
    }
}
