//! Designer session: the object table plus naming and export.
//!
//! [`Designer`] is what an editor host drives. The host applies a mutation
//! transaction, then reports the handles it added; the designer settles their
//! public names before returning. Export runs on the current table without
//! modifying it.

use std::collections::{HashMap, HashSet};

use crate::export::{ExportBundle, ExportConfig, SchemaExporter};
use crate::naming::{NameAllocator, NameAssignment};
use crate::snapshot::{AssetRecord, SnapshotDocument};
use crate::tree::TreeBuilder;
use crate::{
    AssetMap, DesignError, DesignResult, ObjectId, ObjectTable, OrderKey, Schema, VisualObject,
};

/// Suffix appended to the highest sibling key to place an object on top.
const TOP_KEY_SUFFIX: &str = "V";

/// One design being edited.
#[derive(Debug, Clone, Default)]
pub struct Designer {
    table: ObjectTable,
    allocator: NameAllocator,
    assets: Vec<AssetRecord>,
    exporter: SchemaExporter,
}

impl Designer {
    /// Create a designer whose canvas is the given root frame.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] only if the table already
    /// holds the handle, which cannot happen for a fresh designer.
    pub fn new(root_frame: VisualObject) -> DesignResult<Self> {
        let mut designer = Self::default();
        designer.table.insert(root_frame)?;
        Ok(designer)
    }

    /// Load a designer from a snapshot. Stored names are taken as-is.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] if the snapshot repeats a handle.
    pub fn from_snapshot(document: &SnapshotDocument) -> DesignResult<Self> {
        Ok(Self {
            table: document.to_table()?,
            allocator: NameAllocator::new(),
            assets: document.assets.clone(),
            exporter: SchemaExporter::default(),
        })
    }

    /// Replace the export configuration.
    #[must_use]
    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.exporter = SchemaExporter::new(config);
        self
    }

    /// The object table.
    #[must_use]
    pub fn table(&self) -> &ObjectTable {
        &self.table
    }

    /// Mutable access for hosts that apply edits directly.
    ///
    /// Hosts inserting objects this way must follow up with
    /// [`Designer::objects_added`].
    pub fn table_mut(&mut self) -> &mut ObjectTable {
        &mut self.table
    }

    /// Insert a batch of new objects and name them.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] if a handle is already in use;
    /// objects before it in the batch stay inserted and are named.
    pub fn add_objects(
        &mut self,
        objects: impl IntoIterator<Item = VisualObject>,
    ) -> DesignResult<Vec<NameAssignment>> {
        let mut added = Vec::new();
        let mut failure = None;
        for object in objects {
            match self.table.insert(object) {
                Ok(id) => added.push(id),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        let assignments = self.objects_added(&added);
        match failure {
            Some(err) => Err(err),
            None => Ok(assignments),
        }
    }

    /// Settle public names for objects the host already inserted.
    pub fn objects_added(&mut self, added: &[ObjectId]) -> Vec<NameAssignment> {
        self.allocator.on_objects_added(added, &mut self.table)
    }

    /// Copy an object and its descendants, as a paste would.
    ///
    /// Copies get fresh handles and keep their public names, which the
    /// allocator then makes unique. The copied root lands on top of its
    /// siblings. Returns the handle of the copied root.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ObjectNotFound`] if `id` does not exist, or a
    /// tree error if the object's subtree is malformed.
    pub fn duplicate(&mut self, id: &ObjectId) -> DesignResult<ObjectId> {
        let source = self
            .table
            .get(id)
            .ok_or_else(|| DesignError::ObjectNotFound(id.to_string()))?;

        let builder = TreeBuilder::new(self.table.as_slice());
        let mut originals = vec![source];
        let mut seen = HashSet::from([&source.id]);
        let mut cursor = 0;
        while let Some(object) = originals.get(cursor).copied() {
            for &child in builder.children_of(&object.id) {
                if !seen.insert(&child.id) {
                    return Err(DesignError::CycleDetected(child.id.to_string()));
                }
                originals.push(child);
            }
            cursor += 1;
        }

        let top_key = builder
            .children_of(&source.parent)
            .iter()
            .filter_map(|o| o.order_key.as_str())
            .max()
            .map_or_else(|| "a0".to_string(), |key| format!("{key}{TOP_KEY_SUFFIX}"));

        let fresh: HashMap<&ObjectId, ObjectId> = originals
            .iter()
            .map(|o| (&o.id, ObjectId::generate()))
            .collect();
        let mut copies: Vec<VisualObject> = originals
            .iter()
            .map(|original| {
                let mut copy = (*original).clone();
                if let Some(handle) = fresh.get(&original.id) {
                    copy.id = handle.clone();
                }
                if let Some(parent) = fresh.get(&original.parent) {
                    copy.parent = parent.clone();
                }
                copy.meta.root_frame = false;
                copy
            })
            .collect();
        let new_root = copies[0].id.clone();
        copies[0].order_key = OrderKey::new(top_key);

        tracing::debug!(
            source = %id,
            copy = %new_root,
            objects = copies.len(),
            "duplicated subtree"
        );
        self.add_objects(copies)?;
        Ok(new_root)
    }

    /// Remove an object. Its handle is forgotten by the allocator.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ObjectNotFound`] if the object does not exist.
    pub fn remove(&mut self, id: &ObjectId) -> DesignResult<VisualObject> {
        let object = self.table.remove(id)?;
        self.allocator.forget(id);
        Ok(object)
    }

    /// Rename an object from the properties panel.
    ///
    /// # Errors
    ///
    /// See [`ObjectTable::rename`].
    pub fn rename(&mut self, id: &ObjectId, name: impl Into<String>) -> DesignResult<()> {
        self.table.rename(id, name)
    }

    /// Register or update an asset record.
    pub fn put_asset(&mut self, asset: AssetRecord) {
        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    /// Derive the schema for the current design.
    ///
    /// # Errors
    ///
    /// See [`SchemaExporter::build_schema`].
    pub fn schema(&self) -> DesignResult<Schema> {
        self.exporter.build_schema(&self.table, &self.asset_map())
    }

    /// Derive the schema and markup for the current design.
    ///
    /// # Errors
    ///
    /// See [`SchemaExporter::build_schema`].
    pub fn export(&self) -> DesignResult<ExportBundle> {
        self.exporter.export(&self.table, &self.asset_map())
    }

    /// Persistable snapshot of the current design.
    #[must_use]
    pub fn snapshot(&self) -> SnapshotDocument {
        SnapshotDocument::from_table(&self.table, self.assets.clone())
    }

    fn asset_map(&self) -> AssetMap {
        self.assets
            .iter()
            .filter_map(|asset| Some((asset.id.clone(), asset.src.clone()?)))
            .collect()
    }
}
