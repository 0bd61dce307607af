// Widget-tree IR. No serde_json::Value here; codegen sees only these types.

use serde::Serialize;

/// One node of the normalized widget tree. Strict ownership: every node is
/// owned by its parent's `children` vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetNode {
    #[serde(flatten)]
    pub kind: WidgetKind,
    /// Display label from the design document; absent for synthetic nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only `row`, `column`, `container` carry children; leaves stay empty.
    pub children: Vec<WidgetNode>,
}

/// Closed set of node kinds, each with its own prop set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum WidgetKind {
    Text(TextProps),
    Rectangle(RectangleProps),
    Row(FlexProps),
    Column(FlexProps),
    Container(ContainerProps),
    /// Generator-internal spacer; never produced by the normalizer.
    SizedBox(SizedBoxProps),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub value: String,
    /// `0xAARRGGBB`, uppercase hex digits.
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub line_height: Option<f64>,
    pub text_align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleProps {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<String>,
    pub corner_radius: Option<f64>,
}

/// Shared by `row` and `column`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexProps {
    pub spacing: f64,
    pub padding: Option<EdgeInsets>,
    /// The normalizer always fills these; the generator still carries its
    /// own defaults for trees built by hand.
    pub main_axis_alignment: Option<Alignment>,
    pub cross_axis_alignment: Option<Alignment>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProps {
    pub padding: Option<EdgeInsets>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
}

/// Exactly one axis is set, chosen by the generator when it synthesizes
/// the spacer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizedBoxProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Fully-populated or absent entirely; never partially defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Start,
    Center,
    End,
    SpaceBetween,
}

impl Alignment {
    /// Token as it appears in emitted Dart (`CrossAxisAlignment.{token}`).
    pub fn as_token(self) -> &'static str {
        match self {
            Alignment::Start => "start",
            Alignment::Center => "center",
            Alignment::End => "end",
            Alignment::SpaceBetween => "spaceBetween",
        }
    }
}

impl WidgetNode {
    pub fn leaf(kind: WidgetKind, name: Option<String>) -> Self {
        WidgetNode { kind, name, children: Vec::new() }
    }
}
