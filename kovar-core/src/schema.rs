//! Kovar UI schema - the hierarchical document derived from a design.
//!
//! The schema is the intermediate representation between the editor's flat
//! object table and rendered markup. It is rebuilt on every export and has
//! no identity of its own.
//!
//! ## Example
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "root": {
//!     "id": "root",
//!     "type": "container",
//!     "style": { "x": 0, "y": 0, "width": 800, "height": 600 },
//!     "children": [
//!       {
//!         "id": "btn_submit",
//!         "type": "button",
//!         "style": { "x": 40, "y": 500, "width": 120, "height": 40, "borderWidth": 1 },
//!         "binding": "btn_submit"
//!       }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Schema format version written by this crate.
pub const SCHEMA_VERSION: &str = "1.0";

/// Id of the synthetic root node.
pub const ROOT_NODE_ID: &str = "root";

/// Semantic type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    /// Generic block container.
    Container,
    /// Text label.
    Text,
    /// Image.
    Image,
    /// Clickable button.
    Button,
    /// Drawing surface.
    Canvas,
    /// Repeated item template.
    ListItem,
}

/// Resolved geometry and visual attributes of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Left offset in pixels.
    pub x: i64,
    /// Top offset in pixels.
    pub y: i64,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Foreground color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Corner radius in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Border width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Opacity between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl NodeStyle {
    /// Style with only geometry set.
    #[must_use]
    pub fn at(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Node identifier.
    pub id: String,
    /// Semantic type.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Geometry and visual attributes.
    pub style: NodeStyle,
    /// Data-binding key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Text only: render as display text.
    #[serde(
        rename = "is_display",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_display: Option<bool>,
    /// Child nodes; absent rather than empty for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SchemaNode>>,
}

impl SchemaNode {
    /// Create a leaf node.
    #[must_use]
    pub fn new(id: impl Into<String>, node_type: NodeType, style: NodeStyle) -> Self {
        Self {
            id: id.into(),
            node_type,
            style,
            binding: None,
            text: None,
            src: None,
            is_display: None,
            children: None,
        }
    }

    /// Set children, leaving the field absent when `children` is empty.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SchemaNode>) -> Self {
        self.children = (!children.is_empty()).then_some(children);
        self
    }

    /// Children as a slice (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[SchemaNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// The id used in markup: the binding when present, else the node id.
    #[must_use]
    pub fn markup_id(&self) -> &str {
        self.binding.as_deref().unwrap_or(&self.id)
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(SchemaNode::node_count).sum::<usize>()
    }
}

/// Versioned schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Format version.
    pub version: String,
    /// Synthetic root container.
    pub root: SchemaNode,
}

impl Schema {
    /// Parse a schema from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or doesn't match the schema shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
