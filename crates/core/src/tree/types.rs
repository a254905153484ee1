//! Hierarchy domain types.

use serde::{Deserialize, Serialize};

/// A flat record that points at its parent.
///
/// Implemented by every hierarchical list the backend returns (categories,
/// accounts, locations). `parent_id` of `None` marks a root.
pub trait TreeRecord {
    /// The record's unique id.
    fn id(&self) -> i64;
    /// The id of the parent record, if any.
    fn parent_id(&self) -> Option<i64>;
}

/// Generic hierarchical record: `{ id, parent_id, ...payload }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord<T> {
    /// Unique id.
    pub id: i64,
    /// Parent id (`None` = root).
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Domain fields (name, code, status, ...). Opaque to the projector.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> NodeRecord<T> {
    /// Creates a record.
    #[must_use]
    pub const fn new(id: i64, parent_id: Option<i64>, payload: T) -> Self {
        Self {
            id,
            parent_id,
            payload,
        }
    }
}

impl<T> TreeRecord for NodeRecord<T> {
    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

/// A node of the nested tree. Owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode<T> {
    /// Node id.
    pub id: i64,
    /// Resolved parent id. `None` for roots, including promoted orphans.
    pub parent_id: Option<i64>,
    /// The source record.
    pub payload: T,
    /// Children in input order.
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Returns true if the node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including the node itself.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}

/// One row of the depth-annotated pre-order projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatNode<T> {
    /// Node id.
    pub id: i64,
    /// Resolved parent id.
    pub parent_id: Option<i64>,
    /// Distance from the root (root = 0).
    pub depth: usize,
    /// Whether the node has at least one child.
    pub has_children: bool,
    /// Ancestor ids, root first. Empty for roots.
    pub ancestors: Vec<i64>,
    /// The source record.
    pub payload: T,
}

impl<T> FlatNode<T> {
    /// Returns true for root rows.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }
}
