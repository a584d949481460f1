//! Public name allocation.
//!
//! Every object except the root frame carries a human-readable `public_id`
//! that is unique across the design. Names are generated as
//! `"<kind>-<count>"` and collisions are resolved by bumping a trailing
//! numeric suffix:
//!
//! | Existing names         | New object              | Assigned       |
//! |------------------------|-------------------------|----------------|
//! | `rect-1`, `rect-2`     | unnamed rect            | `rect-3`       |
//! | `btn_submit`           | pasted copy, same name  | `btn_submit-1` |
//! | `card-2`               | pasted copy, same name  | `card-3`       |
//!
//! Bumping always advances past the existing suffix, even when a lower
//! number is free.

use std::collections::HashSet;

use crate::{ObjectId, ObjectKind, ObjectTable};

/// Base name used when an object's kind string is empty.
const FALLBACK_KIND: &str = "shape";

/// A public name written onto an object by the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAssignment {
    /// The renamed object.
    pub id: ObjectId,
    /// The name now held by the object.
    pub name: String,
    /// The name the object arrived with, for pasted copies.
    pub previous: Option<String>,
}

/// Keeps public names unique as objects are created, duplicated, or pasted.
///
/// The allocator remembers which handles it has already settled so that a
/// repeated notification for the same object is ignored.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    processed: HashSet<ObjectId>,
}

impl NameAllocator {
    /// Create an allocator with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign names to a batch of newly added objects.
    ///
    /// `added` lists handles already present in `table`. Objects are settled
    /// one at a time, so later objects in the batch see names given to
    /// earlier ones. Handles missing from the table, the root frame, and
    /// handles settled by an earlier call are skipped.
    ///
    /// This never fails.
    pub fn on_objects_added(
        &mut self,
        added: &[ObjectId],
        table: &mut ObjectTable,
    ) -> Vec<NameAssignment> {
        let mut taken: HashSet<String> = table
            .iter()
            .filter_map(|o| o.public_id().map(str::to_string))
            .collect();
        let mut assignments = Vec::new();

        for id in added {
            if self.processed.contains(id) {
                continue;
            }
            let Some(object) = table.get(id) else {
                tracing::trace!(%id, "added object no longer in table");
                continue;
            };
            if object.is_root_frame() {
                continue;
            }

            let assignment = match object.public_id() {
                None => {
                    let count = count_of_kind(table, &object.kind);
                    let mut candidate = format!("{}-{count}", base_for_kind(&object.kind));
                    while taken.contains(&candidate) {
                        candidate = next_name(&candidate, &taken);
                    }
                    Some((candidate, None))
                }
                Some(name) => {
                    let shared = table
                        .iter()
                        .any(|other| other.id != *id && other.public_id() == Some(name));
                    shared.then(|| (next_name(name, &taken), Some(name.to_string())))
                }
            };

            self.processed.insert(id.clone());

            if let Some((name, previous)) = assignment {
                debug_assert!(!taken.contains(&name), "allocated a taken name");
                taken.insert(name.clone());
                if let Some(object) = table.get_mut(id) {
                    object.meta.public_id = Some(name.clone());
                }
                tracing::debug!(%id, %name, ?previous, "assigned public id");
                assignments.push(NameAssignment {
                    id: id.clone(),
                    name,
                    previous,
                });
            }
        }

        assignments
    }

    /// Forget a handle so it is treated as new if it is added again.
    pub fn forget(&mut self, id: &ObjectId) {
        self.processed.remove(id);
    }

    /// Whether the allocator has already settled this handle.
    #[must_use]
    pub fn is_processed(&self, id: &ObjectId) -> bool {
        self.processed.contains(id)
    }
}

fn base_for_kind(kind: &ObjectKind) -> &str {
    match kind.as_str() {
        "" => FALLBACK_KIND,
        name => name,
    }
}

/// Non-root objects of the same kind currently in the table, including the
/// object being named.
fn count_of_kind(table: &ObjectTable, kind: &ObjectKind) -> usize {
    table
        .iter()
        .filter(|o| o.kind == *kind && !o.is_root_frame())
        .count()
}

/// Split `name` into its base and trailing numeric suffix.
///
/// `"nav-bar-12"` → `("nav-bar", Some(12))`; `"header"` → `("header", None)`.
/// A suffix too large to represent is treated as part of the base.
#[must_use]
pub fn split_suffix(name: &str) -> (&str, Option<u64>) {
    if let Some((base, digits)) = name.rsplit_once('-') {
        if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = digits.parse() {
                return (base, Some(number));
            }
        }
    }
    (name, None)
}

/// The next free name after `name`.
///
/// Starts at the suffix after `name`'s own (or 1 when it has none) and skips
/// every name in `taken`.
#[must_use]
pub fn next_name(name: &str, taken: &HashSet<String>) -> String {
    let (base, number) = split_suffix(name);
    let mut suffix = number.map_or(1, |n| n.saturating_add(1));
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        debug_assert!(suffix < u64::MAX, "name suffixes exhausted for {base}");
        suffix = suffix.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisualObject;

    const MAIN: &str = "shape:main";

    fn table_with(objects: Vec<VisualObject>) -> ObjectTable {
        let mut all = vec![VisualObject::root_frame(MAIN, 800.0, 600.0)];
        all.extend(objects);
        ObjectTable::from_objects(all).expect("table")
    }

    fn ids(raw: &[&str]) -> Vec<ObjectId> {
        raw.iter().map(|&s| ObjectId::new(s)).collect()
    }

    fn name_of<'a>(table: &'a ObjectTable, id: &str) -> Option<&'a str> {
        table.get(&ObjectId::new(id)).and_then(VisualObject::public_id)
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(split_suffix("rect-3"), ("rect", Some(3)));
        assert_eq!(split_suffix("nav-bar-12"), ("nav-bar", Some(12)));
        assert_eq!(split_suffix("header"), ("header", None));
        assert_eq!(split_suffix("header-"), ("header-", None));
        assert_eq!(split_suffix("-5"), ("-5", None));
        assert_eq!(split_suffix("v-1a"), ("v-1a", None));
        assert_eq!(
            split_suffix("big-99999999999999999999999"),
            ("big-99999999999999999999999", None)
        );
    }

    #[test]
    fn test_next_name_always_advances() {
        let taken = HashSet::new();
        assert_eq!(next_name("card-2", &taken), "card-3");
        assert_eq!(next_name("btn_submit", &taken), "btn_submit-1");

        let taken: HashSet<String> = ["card-3".to_string(), "card-4".to_string()].into();
        assert_eq!(next_name("card-2", &taken), "card-5");
    }

    #[test]
    fn test_first_object_of_kind() {
        let mut table = table_with(vec![VisualObject::new("shape:a", ObjectKind::Rect, MAIN)]);
        let mut allocator = NameAllocator::new();

        let assigned = allocator.on_objects_added(&ids(&["shape:a"]), &mut table);

        assert_eq!(assigned.len(), 1);
        assert_eq!(name_of(&table, "shape:a"), Some("rect-1"));
    }

    #[test]
    fn test_suffix_monotonicity() {
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Rect, MAIN).with_public_id("rect-1"),
            VisualObject::new("shape:b", ObjectKind::Rect, MAIN).with_public_id("rect-2"),
            VisualObject::new("shape:c", ObjectKind::Rect, MAIN),
        ]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:c"]), &mut table);

        assert_eq!(name_of(&table, "shape:c"), Some("rect-3"));
    }

    #[test]
    fn test_count_collision_bumps() {
        // Two rects, but the one named "rect-2" forces the newcomer past it.
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Rect, MAIN).with_public_id("rect-2"),
            VisualObject::new("shape:b", ObjectKind::Rect, MAIN),
        ]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:b"]), &mut table);

        assert_eq!(name_of(&table, "shape:b"), Some("rect-3"));
    }

    #[test]
    fn test_copy_collision_renames_duplicate_only() {
        let mut table = table_with(vec![
            VisualObject::new("shape:orig", ObjectKind::Rect, MAIN).with_public_id("btn_submit"),
            VisualObject::new("shape:copy", ObjectKind::Rect, MAIN).with_public_id("btn_submit"),
        ]);
        let mut allocator = NameAllocator::new();

        let assigned = allocator.on_objects_added(&ids(&["shape:copy"]), &mut table);

        assert_eq!(name_of(&table, "shape:orig"), Some("btn_submit"));
        assert_eq!(name_of(&table, "shape:copy"), Some("btn_submit-1"));
        assert_eq!(assigned[0].previous.as_deref(), Some("btn_submit"));
    }

    #[test]
    fn test_unique_existing_name_is_kept() {
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Text, MAIN).with_public_id("title"),
        ]);
        let mut allocator = NameAllocator::new();

        let assigned = allocator.on_objects_added(&ids(&["shape:a"]), &mut table);

        assert!(assigned.is_empty());
        assert_eq!(name_of(&table, "shape:a"), Some("title"));
        assert!(allocator.is_processed(&ObjectId::new("shape:a")));
    }

    #[test]
    fn test_batch_sees_earlier_assignments() {
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Text, MAIN),
            VisualObject::new("shape:b", ObjectKind::Text, MAIN),
        ]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:a", "shape:b"]), &mut table);

        // Both count two texts; the second bumps past the first.
        assert_eq!(name_of(&table, "shape:a"), Some("text-2"));
        assert_eq!(name_of(&table, "shape:b"), Some("text-3"));
    }

    #[test]
    fn test_pasted_pair_keeps_one_name() {
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Rect, MAIN).with_public_id("card"),
            VisualObject::new("shape:b", ObjectKind::Rect, MAIN).with_public_id("card"),
        ]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:a", "shape:b"]), &mut table);

        assert_eq!(name_of(&table, "shape:a"), Some("card-1"));
        assert_eq!(name_of(&table, "shape:b"), Some("card"));
    }

    #[test]
    fn test_root_frame_is_never_named() {
        let mut table = table_with(vec![]);
        let mut allocator = NameAllocator::new();

        let assigned = allocator.on_objects_added(&ids(&[MAIN]), &mut table);

        assert!(assigned.is_empty());
        assert_eq!(name_of(&table, MAIN), None);
    }

    #[test]
    fn test_processed_objects_are_not_revisited() {
        let mut table = table_with(vec![
            VisualObject::new("shape:a", ObjectKind::Rect, MAIN).with_public_id("box"),
        ]);
        let mut allocator = NameAllocator::new();
        allocator.on_objects_added(&ids(&["shape:a"]), &mut table);

        // A second object shows up holding the same name; re-notifying the
        // first must not rename it.
        table
            .insert(VisualObject::new("shape:b", ObjectKind::Rect, MAIN).with_public_id("box"))
            .expect("insert");
        allocator.on_objects_added(&ids(&["shape:a"]), &mut table);
        assert_eq!(name_of(&table, "shape:a"), Some("box"));

        allocator.on_objects_added(&ids(&["shape:b"]), &mut table);
        assert_eq!(name_of(&table, "shape:b"), Some("box-1"));

        allocator.forget(&ObjectId::new("shape:a"));
        assert!(!allocator.is_processed(&ObjectId::new("shape:a")));
    }

    #[test]
    fn test_other_kind_uses_its_own_name() {
        let mut table = table_with(vec![VisualObject::new(
            "shape:a",
            ObjectKind::Other("arrow".to_string()),
            MAIN,
        )]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:a"]), &mut table);

        assert_eq!(name_of(&table, "shape:a"), Some("arrow-1"));
    }

    #[test]
    fn test_empty_kind_falls_back() {
        let mut table = table_with(vec![VisualObject::new(
            "shape:a",
            ObjectKind::Other(String::new()),
            MAIN,
        )]);
        let mut allocator = NameAllocator::new();

        allocator.on_objects_added(&ids(&["shape:a"]), &mut table);

        assert_eq!(name_of(&table, "shape:a"), Some("shape-1"));
    }
}
