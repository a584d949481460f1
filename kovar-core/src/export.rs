//! Schema assembly and export.
//!
//! Derives a [`Schema`] from an object table and renders it to markup. The
//! pipeline is pure: it reads an immutable table, never mutates it, and
//! yields the same output every time it runs on the same input.

use serde::{Deserialize, Serialize};

use crate::markup::MarkupRenderer;
use crate::mapper::{AssetMap, NodeMapper};
use crate::schema::{ROOT_NODE_ID, SCHEMA_VERSION};
use crate::tree::{TreeBuilder, DEFAULT_MAX_DEPTH};
use crate::{
    DesignError, DesignResult, NodeStyle, NodeType, ObjectTable, Schema, SchemaNode,
};

/// Configuration for schema export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Version tag written into the schema (default: `"1.0"`).
    pub version: String,
    /// Canvas width used when the root frame has none or zero (default: 800).
    pub fallback_width: f64,
    /// Canvas height used when the root frame has none or zero (default: 600).
    pub fallback_height: f64,
    /// Maximum nesting depth before the export is rejected (default: 256).
    pub max_depth: usize,
    /// Indentation unit for markup output (default: two spaces).
    pub indent: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            fallback_width: 800.0,
            fallback_height: 600.0,
            max_depth: DEFAULT_MAX_DEPTH,
            indent: "  ".to_string(),
        }
    }
}

/// Schema plus its rendered markup, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Structured schema.
    pub schema: Schema,
    /// Rendered markup.
    pub html: String,
}

/// Builds schemas and markup from an object table.
#[derive(Debug, Clone, Default)]
pub struct SchemaExporter {
    config: ExportConfig,
}

impl SchemaExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Derive the schema for the current table.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::MissingRoot`] if no object is flagged as the root
    /// frame, and [`DesignError::CycleDetected`] or
    /// [`DesignError::DepthLimitExceeded`] if the hierarchy is malformed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build_schema(&self, table: &ObjectTable, assets: &AssetMap) -> DesignResult<Schema> {
        let frame = table.root_frame().ok_or(DesignError::MissingRoot)?;

        let tree = TreeBuilder::new(table.as_slice())
            .with_max_depth(self.config.max_depth)
            .build(&frame.id)?;
        let children = NodeMapper::new(assets).map_tree(&tree);

        let width = frame
            .geometry
            .width
            .filter(|&w| w > 0.0)
            .unwrap_or(self.config.fallback_width);
        let height = frame
            .geometry
            .height
            .filter(|&h| h > 0.0)
            .unwrap_or(self.config.fallback_height);
        let root = SchemaNode::new(
            ROOT_NODE_ID,
            NodeType::Container,
            NodeStyle::at(0, 0, width.round() as i64, height.round() as i64),
        )
        .with_children(children);

        let schema = Schema {
            version: self.config.version.clone(),
            root,
        };
        tracing::debug!(
            frame = %frame.id,
            nodes = schema.root.node_count(),
            "schema assembled"
        );
        Ok(schema)
    }

    /// Render a schema to markup.
    #[must_use]
    pub fn render(&self, schema: &Schema) -> String {
        MarkupRenderer::with_indent(self.config.indent.clone()).render(schema)
    }

    /// Derive the schema and render it in one pass.
    ///
    /// # Errors
    ///
    /// See [`SchemaExporter::build_schema`].
    pub fn export(&self, table: &ObjectTable, assets: &AssetMap) -> DesignResult<ExportBundle> {
        let schema = self.build_schema(table, assets)?;
        let html = self.render(&schema);
        Ok(ExportBundle { schema, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentOverride, Geometry, ObjectKind, VisualObject};

    const MAIN: &str = "shape:main";

    fn sample_table() -> ObjectTable {
        ObjectTable::from_objects([
            VisualObject::root_frame(MAIN, 1024.4, 767.6),
            VisualObject::new("shape:btn", ObjectKind::Rect, MAIN)
                .with_order_key("a2")
                .with_public_id("btn_submit")
                .with_component(ComponentOverride::Button)
                .with_geometry(Geometry::new(40.0, 500.0, 120.0, 40.0)),
            VisualObject::new("shape:title", ObjectKind::Text, MAIN)
                .with_order_key("a1")
                .with_public_id("title")
                .with_text("Sign in")
                .with_geometry(Geometry::at(40.0, 20.0)),
        ])
        .expect("table")
    }

    #[test]
    fn test_schema_root_from_frame() {
        let schema = SchemaExporter::with_defaults()
            .build_schema(&sample_table(), &AssetMap::new())
            .expect("schema");

        assert_eq!(schema.version, "1.0");
        assert_eq!(schema.root.id, "root");
        assert_eq!(schema.root.node_type, NodeType::Container);
        assert_eq!(schema.root.style, NodeStyle::at(0, 0, 1024, 768));

        let ids: Vec<_> = schema.root.children().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["title", "btn_submit"]);
    }

    #[test]
    fn test_missing_root_fails() {
        let table = ObjectTable::from_objects([VisualObject::new("shape:a", ObjectKind::Rect, MAIN)])
            .expect("table");

        let err = SchemaExporter::with_defaults()
            .export(&table, &AssetMap::new())
            .expect_err("no root");

        assert!(matches!(err, DesignError::MissingRoot));
    }

    #[test]
    fn test_empty_canvas_has_no_children() {
        let mut frame = VisualObject::root_frame(MAIN, 0.0, 0.0);
        frame.geometry = Geometry::at(0.0, 0.0);
        let table = ObjectTable::from_objects([frame]).expect("table");

        let schema = SchemaExporter::with_defaults()
            .build_schema(&table, &AssetMap::new())
            .expect("schema");

        assert_eq!(schema.root.children, None);
        assert_eq!(schema.root.style, NodeStyle::at(0, 0, 800, 600));
    }

    #[test]
    fn test_zero_sized_frame_uses_fallback() {
        let table =
            ObjectTable::from_objects([VisualObject::root_frame(MAIN, 0.0, 0.0)]).expect("table");

        let schema = SchemaExporter::with_defaults()
            .build_schema(&table, &AssetMap::new())
            .expect("schema");

        assert_eq!(schema.root.style, NodeStyle::at(0, 0, 800, 600));
    }

    #[test]
    fn test_custom_version_and_indent() {
        let exporter = SchemaExporter::new(ExportConfig {
            version: "2.0-beta".to_string(),
            indent: "\t".to_string(),
            ..ExportConfig::default()
        });

        let bundle = exporter
            .export(&sample_table(), &AssetMap::new())
            .expect("export");

        assert_eq!(bundle.schema.version, "2.0-beta");
        assert!(bundle.html.contains("\n\t<k-text id=\"title\""));
    }

    #[test]
    fn test_export_is_idempotent() {
        let exporter = SchemaExporter::with_defaults();
        let table = sample_table();

        let first = exporter.export(&table, &AssetMap::new()).expect("export");
        let second = exporter.export(&table, &AssetMap::new()).expect("export");

        assert_eq!(first, second);
    }
}
