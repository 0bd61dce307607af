//! Design-graph → widget-tree normalization.
//!
//! Single recursive descent over the raw node document. Policies applied
//! here, never in codegen:
//! - tag dispatch with a silent-drop default for nested nodes
//! - layout-mode rule (HORIZONTAL → row, VERTICAL → column, else container)
//! - alignment lookup with an explicit `start` default arm
//! - all-zero padding collapses to `None`
//! - first solid fill wins color extraction

use crate::ir::{
    Alignment, ContainerProps, EdgeInsets, FlexProps, RectangleProps, TextProps, WidgetKind,
    WidgetNode,
};
use crate::schema::{DesignNode, Paint};

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Only the root may fail; nested unsupported nodes are dropped.
    #[error("unsupported root node type: {tag:?}")]
    UnsupportedRoot { tag: String },
}

/// Normalize a raw node document into a widget tree.
///
/// Nested nodes with an unsupported tag are filtered out of their parent's
/// children; an unsupported tag at the root is an error.
pub fn build_widget_tree(root: &DesignNode) -> Result<WidgetNode, NormalizeError> {
    convert_node(root).ok_or_else(|| NormalizeError::UnsupportedRoot { tag: root.tag.clone() })
}

fn convert_node(node: &DesignNode) -> Option<WidgetNode> {
    match node.tag.as_str() {
        "TEXT" => Some(convert_text(node)),
        "RECTANGLE" | "ELLIPSE" => Some(convert_rectangle(node)),
        "FRAME" | "GROUP" | "COMPONENT" | "INSTANCE" | "COMPONENT_SET" => {
            Some(convert_generic_frame(node))
        }
        _ => None,
    }
}

fn convert_text(node: &DesignNode) -> WidgetNode {
    let style = node.style.as_ref();
    WidgetNode::leaf(
        WidgetKind::Text(TextProps {
            value: node.characters.clone().unwrap_or_default(),
            color: extract_fill_color(&node.fills),
            font_size: style.and_then(|s| s.font_size),
            font_family: style.and_then(|s| s.font_family.clone()),
            line_height: style.and_then(|s| s.line_height_px),
            text_align: style
                .and_then(|s| s.text_align_horizontal.as_deref())
                .map(str::to_lowercase),
        }),
        node.name.clone(),
    )
}

fn convert_rectangle(node: &DesignNode) -> WidgetNode {
    let bounds = node.absolute_bounding_box.as_ref();
    // Per-corner list takes precedence over the scalar field, even when empty.
    let corner_radius = match &node.rectangle_corner_radii {
        Some(radii) => radii.first().copied(),
        None => node.corner_radius,
    };
    WidgetNode::leaf(
        WidgetKind::Rectangle(RectangleProps {
            width: bounds.and_then(|b| b.width),
            height: bounds.and_then(|b| b.height),
            color: extract_fill_color(&node.fills),
            corner_radius,
        }),
        node.name.clone(),
    )
}

fn convert_generic_frame(node: &DesignNode) -> WidgetNode {
    let children: Vec<WidgetNode> = node.children.iter().filter_map(convert_node).collect();
    let bounds = node.absolute_bounding_box.as_ref();
    let width = bounds.and_then(|b| b.width);
    let height = bounds.and_then(|b| b.height);
    let background_color = extract_fill_color(&node.fills);
    let padding = extract_padding(node);

    let kind = match node.layout_mode.as_deref() {
        Some("HORIZONTAL") => {
            WidgetKind::Row(flex_props(node, padding, width, height, background_color))
        }
        Some("VERTICAL") => {
            WidgetKind::Column(flex_props(node, padding, width, height, background_color))
        }
        // No auto layout: plain container, no flex alignment semantics.
        _ => WidgetKind::Container(ContainerProps { padding, width, height, background_color }),
    };

    WidgetNode { kind, name: node.name.clone(), children }
}

fn flex_props(
    node: &DesignNode,
    padding: Option<EdgeInsets>,
    width: Option<f64>,
    height: Option<f64>,
    background_color: Option<String>,
) -> FlexProps {
    FlexProps {
        spacing: node.item_spacing.unwrap_or(0.0),
        padding,
        main_axis_alignment: Some(map_alignment(node.primary_axis_align_items.as_deref())),
        cross_axis_alignment: Some(map_alignment(node.counter_axis_align_items.as_deref())),
        width,
        height,
        background_color,
    }
}

fn map_alignment(raw: Option<&str>) -> Alignment {
    match raw {
        Some("MIN") => Alignment::Start,
        Some("CENTER") => Alignment::Center,
        Some("MAX") => Alignment::End,
        Some("SPACE_BETWEEN") => Alignment::SpaceBetween,
        // Unmapped or missing values all land on start.
        _ => Alignment::Start,
    }
}

/// All four sides absent-or-zero → `None`, so zero padding is never emitted.
fn extract_padding(node: &DesignNode) -> Option<EdgeInsets> {
    let sides = [node.padding_left, node.padding_top, node.padding_right, node.padding_bottom];
    if sides.iter().all(|side| side.unwrap_or(0.0) == 0.0) {
        return None;
    }
    Some(EdgeInsets {
        left: node.padding_left.unwrap_or(0.0),
        top: node.padding_top.unwrap_or(0.0),
        right: node.padding_right.unwrap_or(0.0),
        bottom: node.padding_bottom.unwrap_or(0.0),
    })
}

/// Scan the paint stack in order; the first solid paint with a color wins.
fn extract_fill_color(fills: &[Paint]) -> Option<String> {
    fills.iter().find_map(solid_color_hex)
}

/// `0x` + AA + RR + GG + BB, uppercase hex. Alpha comes from the paint's
/// opacity, else the color's own alpha channel, else 1.0.
fn solid_color_hex(fill: &Paint) -> Option<String> {
    if fill.tag != "SOLID" {
        return None;
    }
    let color = fill.color?;
    let alpha = fill.opacity.or(color.a).unwrap_or(1.0);
    Some(format!(
        "0x{}{}{}{}",
        channel_hex(alpha),
        channel_hex(color.r),
        channel_hex(color.g),
        channel_hex(color.b)
    ))
}

fn channel_hex(unit: f64) -> String {
    format!("{:02X}", (unit * 255.0).round() as u8)
}

// ------------------------------- Tests ------------------------------------ //
