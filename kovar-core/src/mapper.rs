//! Mapping of visual objects onto schema nodes.

use std::collections::HashMap;

use crate::{
    ComponentOverride, NodeStyle, NodeType, ObjectKind, SchemaNode, TreeNode, VisualObject,
};

/// Color the editor uses when none was picked.
const DEFAULT_COLOR: &str = "black";

/// Fill mode the editor uses when none was picked.
const DEFAULT_FILL: &str = "none";

/// Border width for rectangle-like objects without an explicit width.
pub const DEFAULT_BORDER_WIDTH: u32 = 1;

/// Image asset reference → resolved source (URL or data URI).
pub type AssetMap = HashMap<String, String>;

/// Converts objects into schema nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeMapper<'a> {
    assets: &'a AssetMap,
}

impl<'a> NodeMapper<'a> {
    /// Create a mapper resolving image references through `assets`.
    #[must_use]
    pub fn new(assets: &'a AssetMap) -> Self {
        Self { assets }
    }

    /// Map a built tree, preserving sibling order.
    #[must_use]
    pub fn map_tree(&self, nodes: &[TreeNode<'_>]) -> Vec<SchemaNode> {
        nodes
            .iter()
            .map(|node| {
                let children = self.map_tree(&node.children);
                self.map_object(node.object, children)
            })
            .collect()
    }

    /// Map one object whose children have already been mapped.
    #[must_use]
    pub fn map_object(&self, object: &VisualObject, children: Vec<SchemaNode>) -> SchemaNode {
        let public_id = object.public_id();
        let id = public_id.unwrap_or_else(|| object.id.local_part());

        let mut node = SchemaNode::new(id, resolve_type(object), resolve_style(object));
        node.binding = public_id.map(str::to_string);

        if object.kind == ObjectKind::Text {
            node.text = object
                .text
                .as_ref()
                .map(crate::TextContent::plain_text)
                .filter(|text| !text.is_empty());
            if object.meta.display {
                node.is_display = Some(true);
            }
        }

        if object.kind == ObjectKind::Image {
            node.src = object.image_ref.as_deref().map(|asset| self.resolve_asset(asset));
        }

        tracing::trace!(id = %node.id, node_type = ?node.node_type, "mapped object");
        node.with_children(children)
    }

    fn resolve_asset(&self, asset: &str) -> String {
        match self.assets.get(asset) {
            Some(src) => src.clone(),
            None => {
                tracing::debug!(asset, "asset not in map, using raw reference");
                asset.to_string()
            }
        }
    }
}

/// Semantic type for an object.
#[must_use]
pub fn resolve_type(object: &VisualObject) -> NodeType {
    match &object.kind {
        ObjectKind::Rect => match object.meta.component {
            Some(ComponentOverride::Button) => NodeType::Button,
            Some(ComponentOverride::Canvas) => NodeType::Canvas,
            Some(ComponentOverride::Container) | None => NodeType::Container,
        },
        ObjectKind::Text => NodeType::Text,
        ObjectKind::Image => NodeType::Image,
        ObjectKind::Frame | ObjectKind::Other(_) => NodeType::Container,
    }
}

/// Rounded geometry plus the non-default visual attributes of an object.
///
/// The border width comes from the object itself; rectangle-like objects
/// always carry one.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn resolve_style(object: &VisualObject) -> NodeStyle {
    let geometry = &object.geometry;
    let mut style = NodeStyle::at(
        geometry.x.round() as i64,
        geometry.y.round() as i64,
        geometry.width.unwrap_or(0.0).round() as i64,
        geometry.height.unwrap_or(0.0).round() as i64,
    );

    let visual = &object.style;
    style.color = visual
        .color
        .clone()
        .filter(|color| color != DEFAULT_COLOR);
    style.background_color = visual.fill.clone().filter(|fill| fill != DEFAULT_FILL);
    style.opacity = visual
        .opacity
        .filter(|opacity| (opacity - 1.0).abs() > f64::EPSILON);

    if object.kind == ObjectKind::Rect {
        let width = visual
            .border_width
            .filter(|&w| w > 0)
            .unwrap_or(DEFAULT_BORDER_WIDTH);
        style.border_width = Some(width);
    }

    style
}
