//! Canonical persisted form of a design.
//!
//! A snapshot holds the full object collection and the asset records. It is
//! the source of truth on disk; schema and markup are regenerated from it on
//! demand.

use serde::{Deserialize, Serialize};

use crate::mapper::AssetMap;
use crate::{DesignError, DesignResult, ObjectTable, VisualObject};

/// Snapshot format revision written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A binary asset referenced by image objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Asset reference used by `image_ref`.
    pub id: String,
    /// Resolved source (URL or data URI), if the asset has been uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Versioned snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Format revision.
    #[serde(default = "SnapshotDocument::default_version")]
    pub schema_version: u32,
    /// All objects, in table order.
    #[serde(default)]
    pub objects: Vec<VisualObject>,
    /// Asset records.
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

impl SnapshotDocument {
    const fn default_version() -> u32 {
        SNAPSHOT_VERSION
    }

    /// Build a document from a table and its assets.
    #[must_use]
    pub fn from_table(table: &ObjectTable, assets: Vec<AssetRecord>) -> Self {
        Self {
            schema_version: SNAPSHOT_VERSION,
            objects: table.iter().cloned().collect(),
            assets,
        }
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Serialization`] for invalid JSON and
    /// [`DesignError::UnsupportedVersion`] for an unknown format revision.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.schema_version != SNAPSHOT_VERSION {
            return Err(DesignError::UnsupportedVersion(document.schema_version));
        }
        Ok(document)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> DesignResult<String> {
        serde_json::to_string_pretty(self).map_err(DesignError::Serialization)
    }

    /// Image reference → source map for assets that have a source.
    #[must_use]
    pub fn asset_map(&self) -> AssetMap {
        self.assets
            .iter()
            .filter_map(|asset| Some((asset.id.clone(), asset.src.clone()?)))
            .collect()
    }

    /// Materialize the object table.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] if two objects share a handle.
    pub fn to_table(&self) -> DesignResult<ObjectTable> {
        ObjectTable::from_objects(self.objects.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "schema_version": 1,
        "objects": [
            { "id": "shape:main", "kind": "frame", "parent": "page:page",
              "geometry": { "x": 0, "y": 0, "width": 800, "height": 600 },
              "meta": { "root_frame": true } },
            { "id": "shape:logo", "kind": "image", "parent": "shape:main", "order_key": "a1",
              "geometry": { "x": 10, "y": 10, "width": 64, "height": 64 },
              "image_ref": "asset:logo" }
        ],
        "assets": [
            { "id": "asset:logo", "src": "https://cdn.example.com/logo.svg" },
            { "id": "asset:pending" }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let document = SnapshotDocument::from_json(SAMPLE).expect("should parse");
        let table = document.to_table().expect("table");

        assert_eq!(table.len(), 2);
        assert!(table.root_frame().is_some());

        let assets = document.asset_map();
        assert_eq!(assets.len(), 1);
        assert_eq!(
            assets.get("asset:logo").map(String::as_str),
            Some("https://cdn.example.com/logo.svg")
        );
    }

    #[test]
    fn test_unknown_version_rejected() {
        let err = SnapshotDocument::from_json(r#"{ "schema_version": 9, "objects": [] }"#)
            .expect_err("version");
        assert!(matches!(err, DesignError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = SnapshotDocument::from_json("{ nope").expect_err("json");
        assert!(matches!(err, DesignError::Serialization(_)));
    }

    #[test]
    fn test_duplicate_handles_rejected() {
        let json = r#"{ "objects": [
            { "id": "shape:a", "kind": "rect", "parent": "shape:main" },
            { "id": "shape:a", "kind": "text", "parent": "shape:main" }
        ] }"#;

        let document = SnapshotDocument::from_json(json).expect("parses");
        let err = document.to_table().expect_err("duplicate");
        assert!(matches!(err, DesignError::DuplicateObject(_)));
    }

    #[test]
    fn test_table_round_trip_preserves_order() {
        let document = SnapshotDocument::from_json(SAMPLE).expect("should parse");
        let table = document.to_table().expect("table");

        let rebuilt = SnapshotDocument::from_table(&table, document.assets.clone());

        assert_eq!(rebuilt, document);
    }
}
