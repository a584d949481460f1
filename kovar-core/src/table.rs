//! Indexed object table keyed by stable handle.

use std::collections::HashMap;

use crate::{DesignError, DesignResult, ObjectId, VisualObject};

/// Flat collection of all visual objects in a design.
///
/// Objects are stored in insertion order and indexed by handle. Parent/child
/// structure is not tracked here; it is derived on demand from each object's
/// `parent` reference by [`crate::tree`].
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
    objects: Vec<VisualObject>,
    index: HashMap<ObjectId, usize>,
}

impl ObjectTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from objects in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] if two objects share a handle.
    pub fn from_objects(objects: impl IntoIterator<Item = VisualObject>) -> DesignResult<Self> {
        let mut table = Self::new();
        for object in objects {
            table.insert(object)?;
        }
        Ok(table)
    }

    /// Add an object to the table.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateObject`] if the handle is already present.
    pub fn insert(&mut self, object: VisualObject) -> DesignResult<ObjectId> {
        if self.index.contains_key(&object.id) {
            return Err(DesignError::DuplicateObject(object.id.to_string()));
        }
        let id = object.id.clone();
        self.index.insert(id.clone(), self.objects.len());
        self.objects.push(object);
        Ok(id)
    }

    /// Remove an object from the table.
    ///
    /// Children of the removed object are left in place; they simply stop
    /// being reachable from the root frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn remove(&mut self, id: &ObjectId) -> DesignResult<VisualObject> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| DesignError::ObjectNotFound(id.to_string()))?;
        let object = self.objects.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(object)
    }

    /// Get an object by handle.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&VisualObject> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    /// Get a mutable reference to an object by handle.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut VisualObject> {
        self.index.get(id).map(|&i| &mut self.objects[i])
    }

    /// Whether an object with this handle exists.
    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains_key(id)
    }

    /// All objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualObject> {
        self.objects.iter()
    }

    /// All objects as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[VisualObject] {
        &self.objects
    }

    /// The object flagged as the canvas root frame, if any.
    #[must_use]
    pub fn root_frame(&self) -> Option<&VisualObject> {
        self.objects.iter().find(|o| o.is_root_frame())
    }

    /// Find the object currently holding a public name.
    #[must_use]
    pub fn find_by_public_id(&self, name: &str) -> Option<&VisualObject> {
        self.objects
            .iter()
            .find(|o| !o.is_root_frame() && o.public_id() == Some(name))
    }

    /// Give an object a user-chosen public name.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ObjectNotFound`] if the object does not exist and
    /// [`DesignError::NameTaken`] if a different object already holds `name`.
    pub fn rename(&mut self, id: &ObjectId, name: impl Into<String>) -> DesignResult<()> {
        let name = name.into();
        if let Some(holder) = self.find_by_public_id(&name) {
            if holder.id != *id {
                return Err(DesignError::NameTaken(name));
            }
        }
        let object = self
            .get_mut(id)
            .ok_or_else(|| DesignError::ObjectNotFound(id.to_string()))?;
        object.meta.public_id = Some(name);
        Ok(())
    }

    /// Number of objects in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl IntoIterator for ObjectTable {
    type Item = VisualObject;
    type IntoIter = std::vec::IntoIter<VisualObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectKind;

    fn rect(id: &str) -> VisualObject {
        VisualObject::new(id, ObjectKind::Rect, "shape:main")
    }

    #[test]
    fn test_table_insert_remove() {
        let mut table = ObjectTable::new();
        assert!(table.is_empty());

        table.insert(rect("shape:a")).expect("should insert");
        table.insert(rect("shape:b")).expect("should insert");
        table.insert(rect("shape:c")).expect("should insert");
        assert_eq!(table.len(), 3);

        table.remove(&"shape:a".into()).expect("should remove");
        assert_eq!(table.len(), 2);
        assert!(!table.contains(&"shape:a".into()));

        // Index stays consistent after the shift.
        let c = table.get(&"shape:c".into()).expect("c present");
        assert_eq!(c.id.as_str(), "shape:c");
        let order: Vec<_> = table.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order, ["shape:b", "shape:c"]);
    }

    #[test]
    fn test_duplicate_handle_rejected() {
        let mut table = ObjectTable::new();
        table.insert(rect("shape:a")).expect("should insert");
        let err = table.insert(rect("shape:a")).expect_err("duplicate");
        assert!(matches!(err, DesignError::DuplicateObject(_)));
    }

    #[test]
    fn test_remove_missing_object() {
        let mut table = ObjectTable::new();
        let err = table.remove(&"shape:nope".into()).expect_err("missing");
        assert!(matches!(err, DesignError::ObjectNotFound(_)));
    }

    #[test]
    fn test_rename_rejects_taken_name() {
        let mut table = ObjectTable::from_objects([
            rect("shape:a").with_public_id("header"),
            rect("shape:b").with_public_id("footer"),
        ])
        .expect("table");

        let err = table
            .rename(&"shape:b".into(), "header")
            .expect_err("taken");
        assert!(matches!(err, DesignError::NameTaken(name) if name == "header"));

        // Renaming to its own name is a no-op.
        table
            .rename(&"shape:a".into(), "header")
            .expect("same name is fine");
        table
            .rename(&"shape:b".into(), "nav")
            .expect("free name is fine");
        assert_eq!(
            table.get(&"shape:b".into()).and_then(VisualObject::public_id),
            Some("nav")
        );
    }

    #[test]
    fn test_root_frame_lookup() {
        let table = ObjectTable::from_objects([
            rect("shape:a"),
            VisualObject::root_frame("shape:main", 800.0, 600.0),
        ])
        .expect("table");
        assert_eq!(
            table.root_frame().map(|o| o.id.as_str()),
            Some("shape:main")
        );
    }
}
