//! Ordered tree reconstruction from the flat object table.

use std::collections::{HashMap, HashSet};

use crate::{DesignError, DesignResult, ObjectId, VisualObject};

/// Default bound on nesting depth during a tree walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// An object together with its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    /// The object at this position.
    pub object: &'a VisualObject,
    /// Children in sibling order.
    pub children: Vec<TreeNode<'a>>,
}

/// Rebuilds parent/child structure from `parent` references and order keys.
///
/// The builder indexes every object by parent once, so each level is a
/// lookup rather than a scan of the whole collection.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    by_parent: HashMap<&'a ObjectId, Vec<&'a VisualObject>>,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Index `objects` by parent. Siblings are sorted by order key, keeping
    /// input order among equal keys.
    #[must_use]
    pub fn new(objects: &'a [VisualObject]) -> Self {
        let mut by_parent: HashMap<&ObjectId, Vec<&VisualObject>> = HashMap::new();
        for object in objects {
            by_parent.entry(&object.parent).or_default().push(object);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| a.order_key.cmp(&b.order_key));
        }
        Self {
            by_parent,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Direct children of `parent`, in sibling order.
    #[must_use]
    pub fn children_of(&self, parent: &ObjectId) -> &[&'a VisualObject] {
        self.by_parent.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Build the full ordered subtree under `root`.
    ///
    /// `root` itself is not part of the result; it counts as visited, so an
    /// object pointing back at it from inside its own subtree is a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::CycleDetected`] if an object is reached twice and
    /// [`DesignError::DepthLimitExceeded`] if nesting exceeds the limit.
    pub fn build(&self, root: &ObjectId) -> DesignResult<Vec<TreeNode<'a>>> {
        let mut visited = HashSet::new();
        visited.insert(root);
        self.build_level(root, 0, &mut visited)
    }

    fn build_level<'v>(
        &self,
        parent: &ObjectId,
        depth: usize,
        visited: &mut HashSet<&'v ObjectId>,
    ) -> DesignResult<Vec<TreeNode<'a>>>
    where
        'a: 'v,
    {
        let siblings = self.children_of(parent);
        if !siblings.is_empty() && depth >= self.max_depth {
            return Err(DesignError::DepthLimitExceeded(self.max_depth));
        }
        let mut nodes = Vec::with_capacity(siblings.len());
        for &object in siblings {
            if !visited.insert(&object.id) {
                return Err(DesignError::CycleDetected(object.id.to_string()));
            }
            let children = self.build_level(&object.id, depth + 1, visited)?;
            nodes.push(TreeNode { object, children });
        }
        Ok(nodes)
    }
}

/// Build the ordered subtree under `parent` with the default depth limit.
///
/// # Errors
///
/// See [`TreeBuilder::build`].
pub fn build_children<'a>(
    objects: &'a [VisualObject],
    parent: &ObjectId,
) -> DesignResult<Vec<TreeNode<'a>>> {
    TreeBuilder::new(objects).build(parent)
}
