//! Typed input schema for Figma node documents.
//!
//! Every field the upstream API may omit is optional or defaulted here, so
//! the normalizer never has to reason about missing-vs-null again. Unknown
//! `type` tags are kept as raw strings; the normalizer owns the tag lookup
//! and its default branch.

use serde::{Deserialize, Serialize};

/// One node of the design document graph, as returned by the Figma API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignNode {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Discriminating tag (`TEXT`, `FRAME`, ...). Empty when absent.
    #[serde(rename = "type")]
    pub tag: String,
    /// Text content (TEXT nodes only).
    pub characters: Option<String>,
    /// Ordered paint stack; the first solid entry wins during extraction.
    pub fills: Vec<Paint>,
    /// Typography (TEXT nodes only).
    pub style: Option<TypeStyle>,
    pub absolute_bounding_box: Option<BoundingBox>,
    /// Auto-layout: `HORIZONTAL`, `VERTICAL`, or anything else for none.
    pub layout_mode: Option<String>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    /// Single scalar radius, used when the per-corner list is absent.
    pub corner_radius: Option<f64>,
    /// Per-corner radii; only the first entry is consumed.
    pub rectangle_corner_radii: Option<Vec<f64>>,
    pub children: Vec<DesignNode>,
}

/// A paint descriptor. Only `SOLID` paints contribute color.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paint {
    #[serde(rename = "type")]
    pub tag: String,
    pub color: Option<PaintColor>,
    /// Paint-level opacity; overrides the color's own alpha when present.
    pub opacity: Option<f64>,
}

/// Unit-interval color channels. Missing channels read as 0.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PaintColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

/// Typography subset consumed by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub line_height_px: Option<f64>,
    pub text_align_horizontal: Option<String>,
}

/// Absolute bounds; echoed verbatim by the metadata operation.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BoundingBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_realistic_frame() {
        let raw = serde_json::json!({
            "id": "1:2",
            "name": "Card",
            "type": "FRAME",
            "layoutMode": "VERTICAL",
            "itemSpacing": 8,
            "paddingLeft": 16,
            "paddingTop": 16,
            "absoluteBoundingBox": { "x": 0, "y": 0, "width": 320, "height": 200 },
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }],
            "children": [
                { "id": "1:3", "name": "Title", "type": "TEXT", "characters": "Hello",
                  "style": { "fontSize": 14, "fontFamily": "Inter", "lineHeightPx": 20,
                             "textAlignHorizontal": "LEFT" } }
            ]
        });
        let node: DesignNode = serde_json::from_value(raw).unwrap();
        assert_eq!(node.tag, "FRAME");
        assert_eq!(node.layout_mode.as_deref(), Some("VERTICAL"));
        assert_eq!(node.item_spacing, Some(8.0));
        assert_eq!(node.children.len(), 1);
        let title = &node.children[0];
        assert_eq!(title.tag, "TEXT");
        assert_eq!(title.characters.as_deref(), Some("Hello"));
        assert_eq!(title.style.as_ref().unwrap().line_height_px, Some(20.0));
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let node: DesignNode = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(node.tag, "");
        assert!(node.fills.is_empty());
        assert!(node.children.is_empty());
        assert!(node.absolute_bounding_box.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = serde_json::json!({
            "type": "TEXT",
            "strokes": [],
            "exportSettings": [{ "format": "PNG" }],
            "pluginData": { "anything": true }
        });
        let node: DesignNode = serde_json::from_value(raw).unwrap();
        assert_eq!(node.tag, "TEXT");
    }
}
