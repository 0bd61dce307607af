//! Widget-tree → Dart source emission.
//!
//! One pure render function per IR kind, each taking the indentation depth
//! it must emit at; `pad` owns the two-space unit. The body is emitted
//! directly at its final depth inside the `build` method, so no re-indent
//! pass runs over generated text afterwards.
//!
//! Emission never fails: every kind renders to valid Dart, and the
//! prop guards treat 0 as "unset" so zero-valued sizes, radii, and spacing
//! disappear from the output.

use std::borrow::Cow;

use crate::ir::{
    Alignment, ContainerProps, EdgeInsets, FlexProps, RectangleProps, SizedBoxProps, TextProps,
    WidgetKind, WidgetNode,
};

const INDENT_UNIT: &str = "  ";

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Generate a complete `StatelessWidget` definition for the tree.
pub fn generate_widget(class_name: &str, tree: &WidgetNode) -> String {
    let body = render_node(tree, 2);
    let mut lines: Vec<String> = body.lines().map(str::to_owned).collect();

    // The root construct carries the return statement on its first line.
    lines[0] = format!("{}return {}", pad(2), lines[0].trim_start());
    if let Some(last) = lines.last_mut() {
        if !last.trim_end().ends_with(';') {
            last.push(';');
        }
    }
    let build_body = lines.join("\n");

    format!(
        "import 'package:flutter/material.dart';\n\
         \n\
         class {class_name} extends StatelessWidget {{\n\
         {u}const {class_name}({{super.key}});\n\
         \n\
         {u}@override\n\
         {u}Widget build(BuildContext context) {{\n\
         {build_body}\n\
         {u}}}\n\
         }}\n",
        u = INDENT_UNIT,
    )
}

fn pad(depth: usize) -> String {
    INDENT_UNIT.repeat(depth)
}

fn render_node(node: &WidgetNode, depth: usize) -> String {
    match &node.kind {
        WidgetKind::Row(props) => render_flex("Row", Axis::Horizontal, node, props, depth),
        WidgetKind::Column(props) => render_flex("Column", Axis::Vertical, node, props, depth),
        WidgetKind::Container(props) => render_container(node, props, depth),
        WidgetKind::Text(props) => render_text(props, depth),
        WidgetKind::Rectangle(props) => render_rectangle(props, depth),
        WidgetKind::SizedBox(props) => render_sized_box(props, depth),
    }
}

fn render_flex(
    construct: &str,
    axis: Axis,
    node: &WidgetNode,
    props: &FlexProps,
    depth: usize,
) -> String {
    let spaced = interleave_spacing(&node.children, props.spacing, axis);
    let children_code = render_children(&spaced, depth + 1);

    // Row's cross axis centers by default; everything else starts.
    let cross_default = match axis {
        Axis::Horizontal => Alignment::Center,
        Axis::Vertical => Alignment::Start,
    };
    let cross = props.cross_axis_alignment.unwrap_or(cross_default);
    let main = props.main_axis_alignment.unwrap_or(Alignment::Start);

    let fields = [
        format!("crossAxisAlignment: CrossAxisAlignment.{}", cross.as_token()),
        format!("mainAxisAlignment: MainAxisAlignment.{}", main.as_token()),
        format!("children: {children_code}"),
    ];
    format!(
        "{i}{construct}(\n{i1}{}\n{i})",
        fields.join(&format!(",\n{}", pad(depth + 1))),
        i = pad(depth),
        i1 = pad(depth + 1),
    )
}

/// Interleave a synthetic spacer strictly between adjacent children: never
/// before the first, never after the last.
fn interleave_spacing<'a>(
    children: &'a [WidgetNode],
    spacing: f64,
    axis: Axis,
) -> Vec<Cow<'a, WidgetNode>> {
    if spacing <= 0.0 || children.len() < 2 {
        return children.iter().map(Cow::Borrowed).collect();
    }
    let gap = WidgetNode::leaf(
        WidgetKind::SizedBox(match axis {
            Axis::Horizontal => SizedBoxProps { width: Some(spacing), height: None },
            Axis::Vertical => SizedBoxProps { width: None, height: Some(spacing) },
        }),
        None,
    );
    let mut out = Vec::with_capacity(children.len() * 2 - 1);
    for (index, child) in children.iter().enumerate() {
        out.push(Cow::Borrowed(child));
        if index + 1 < children.len() {
            out.push(Cow::Owned(gap.clone()));
        }
    }
    out
}

/// Children list literal; the closing bracket sits at `depth`, entries one
/// level deeper.
fn render_children(children: &[Cow<'_, WidgetNode>], depth: usize) -> String {
    if children.is_empty() {
        return "[]".to_owned();
    }
    let rendered = children
        .iter()
        .map(|child| render_node(child, depth + 1))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("[\n{rendered}\n{}]", pad(depth))
}

fn render_container(node: &WidgetNode, props: &ContainerProps, depth: usize) -> String {
    let mut fields = Vec::new();
    if let Some(width) = set(props.width) {
        fields.push(format!("width: {}", format_number(width)));
    }
    if let Some(height) = set(props.height) {
        fields.push(format!("height: {}", format_number(height)));
    }
    if let Some(padding) = props.padding.as_ref().and_then(render_padding) {
        fields.push(format!("padding: {padding}"));
    }
    if let Some(color) = &props.background_color {
        fields.push(format!("decoration: BoxDecoration(color: {})", render_color(color)));
    }
    // Only the first child survives emission; a container without explicit
    // row/column layout renders a single nested child.
    if let Some(first) = node.children.first() {
        let child_code = render_node(first, depth + 2);
        fields.push(format!("child: \n{child_code}"));
    }
    format!("{}Container({})", pad(depth), fields.join(", "))
}

fn render_text(props: &TextProps, depth: usize) -> String {
    let mut fields = vec![format!("'{}'", props.value.replace('\'', "\\'"))];
    if let Some(style) = render_text_style(props) {
        fields.push(format!("style: {style}"));
    }
    if let Some(align) = props.text_align.as_deref().filter(|a| !a.is_empty()) {
        fields.push(format!("textAlign: TextAlign.{align}"));
    }
    format!("{}Text({})", pad(depth), fields.join(", "))
}

fn render_rectangle(props: &RectangleProps, depth: usize) -> String {
    let mut fields = Vec::new();
    if let Some(width) = set(props.width) {
        fields.push(format!("width: {}", format_number(width)));
    }
    if let Some(height) = set(props.height) {
        fields.push(format!("height: {}", format_number(height)));
    }
    let mut decoration = Vec::new();
    if let Some(color) = &props.color {
        decoration.push(format!("color: {}", render_color(color)));
    }
    if let Some(radius) = set(props.corner_radius) {
        decoration.push(format!("borderRadius: BorderRadius.circular({})", format_number(radius)));
    }
    if !decoration.is_empty() {
        fields.push(format!("decoration: BoxDecoration({})", decoration.join(", ")));
    }
    if fields.is_empty() {
        // Nothing to show: neutral empty box.
        return format!("{}Container()", pad(depth));
    }
    format!("{}Container({})", pad(depth), fields.join(", "))
}

fn render_sized_box(props: &SizedBoxProps, depth: usize) -> String {
    let mut fields = Vec::new();
    if let Some(width) = set(props.width) {
        fields.push(format!("width: {}", format_number(width)));
    }
    if let Some(height) = set(props.height) {
        fields.push(format!("height: {}", format_number(height)));
    }
    format!("{}SizedBox({})", pad(depth), fields.join(", "))
}

fn render_text_style(props: &TextProps) -> Option<String> {
    let mut segments = Vec::new();
    if let Some(color) = &props.color {
        segments.push(format!("color: {}", render_color(color)));
    }
    if let Some(size) = set(props.font_size) {
        segments.push(format!("fontSize: {}", format_number(size)));
    }
    if let Some(family) = props.font_family.as_deref().filter(|f| !f.is_empty()) {
        segments.push(format!("fontFamily: '{family}'"));
    }
    // Flutter's `height` is a ratio; only meaningful with a nonzero font size.
    if let (Some(line_height), Some(size)) = (set(props.line_height), set(props.font_size)) {
        let height = line_height / size;
        if height != 0.0 {
            segments.push(format!("height: {}", format_number(height)));
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(format!("TextStyle({})", segments.join(", ")))
}

/// Uniform padding collapses to `EdgeInsets.all`; uniform zero disappears.
fn render_padding(padding: &EdgeInsets) -> Option<String> {
    let EdgeInsets { left, top, right, bottom } = *padding;
    if left == top && top == right && right == bottom {
        if left == 0.0 {
            return None;
        }
        return Some(format!("EdgeInsets.all({})", format_number(left)));
    }
    Some(format!(
        "EdgeInsets.fromLTRB({}, {}, {}, {})",
        format_number(left),
        format_number(top),
        format_number(right),
        format_number(bottom)
    ))
}

fn render_color(hex: &str) -> String {
    format!("const Color({hex})")
}

/// Round to 2 decimals; integral values render without a fractional part.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded.trunc() as i64)
    } else {
        format!("{rounded}")
    }
}

/// Emission guard: zero-valued props read as unset.
fn set(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

// ------------------------------- Tests ------------------------------------ //
