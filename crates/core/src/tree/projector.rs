//! Tree projection: flat parent-pointer list -> nested tree -> indented rows.

use std::collections::HashMap;

use medistock_shared::config::TreeConfig;
use serde::Serialize;
use tracing::debug;

use super::error::TreeError;
use super::expansion::{ExpansionState, visible_rows};
use super::types::{FlatNode, TreeNode, TreeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    InPath,
    Done,
}

/// A fully projected hierarchy for one screen.
#[derive(Debug, Clone, Serialize)]
pub struct TreeProjection<T> {
    /// Nested tree for recursive rendering.
    pub tree: Vec<TreeNode<T>>,
    /// Pre-order, depth-annotated rows for table rendering.
    pub rows: Vec<FlatNode<T>>,
    /// Current expand/collapse state.
    pub expansion: ExpansionState,
}

impl<T> TreeProjection<T> {
    /// Rows visible under the current expansion state.
    #[must_use]
    pub fn visible(&self) -> Vec<&FlatNode<T>> {
        visible_rows(&self.rows, &self.expansion)
    }

    /// Flips one node's expansion flag.
    pub fn toggle(&mut self, id: i64) -> bool {
        self.expansion.toggle(id)
    }
}

/// Stateless hierarchy projector.
pub struct TreeProjector;

impl TreeProjector {
    /// Builds the nested tree from a flat list.
    ///
    /// Records whose `parent_id` is `None` or does not resolve to another
    /// record become roots. Children keep input order.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::DuplicateId` if two records share an id and
    /// `TreeError::Cycle` if any record is its own ancestor.
    pub fn build_tree<R: TreeRecord>(records: Vec<R>) -> Result<Vec<TreeNode<R>>, TreeError> {
        let mut index: HashMap<i64, usize> = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id(), i).is_some() {
                return Err(TreeError::DuplicateId { id: record.id() });
            }
        }

        let parents: Vec<Option<usize>> = records
            .iter()
            .map(|record| {
                let parent_id = record.parent_id()?;
                let parent = index.get(&parent_id).copied();
                if parent.is_none() {
                    debug!(id = record.id(), parent_id, "Promoting orphaned node to root");
                }
                parent
            })
            .collect();

        let depths = Self::resolve_depths(&records, &parents)?;

        // Deepest first; siblings share a depth so they attach in input order.
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by(|a, b| depths[*b].cmp(&depths[*a]));

        let mut slots: Vec<Option<TreeNode<R>>> = records
            .into_iter()
            .zip(&parents)
            .map(|(record, parent)| {
                Some(TreeNode {
                    id: record.id(),
                    parent_id: if parent.is_some() { record.parent_id() } else { None },
                    payload: record,
                    children: Vec::new(),
                })
            })
            .collect();

        for i in order {
            let Some(parent) = parents[i] else { continue };
            if let Some(node) = slots[i].take()
                && let Some(Some(parent_node)) = slots.get_mut(parent)
            {
                parent_node.children.push(node);
            }
        }

        let roots: Vec<TreeNode<R>> = slots.into_iter().flatten().collect();
        debug!(roots = roots.len(), "Built tree");
        Ok(roots)
    }

    /// Builds a tree from only the records accepted by `keep`.
    ///
    /// Descendants of rejected records are promoted to roots.
    ///
    /// # Errors
    ///
    /// Same as [`TreeProjector::build_tree`].
    pub fn build_tree_filtered<R, F>(
        records: Vec<R>,
        keep: F,
    ) -> Result<Vec<TreeNode<R>>, TreeError>
    where
        R: TreeRecord,
        F: FnMut(&R) -> bool,
    {
        Self::build_tree(records.into_iter().filter(keep).collect())
    }

    /// Narrows a tree to the nodes matching a search.
    ///
    /// A node survives when it matches or any of its descendants does, so
    /// every match keeps its full ancestor chain. Non-matching subtrees are
    /// dropped entirely. Order is preserved.
    #[must_use]
    pub fn prune<T, F>(tree: Vec<TreeNode<T>>, mut matches: F) -> Vec<TreeNode<T>>
    where
        F: FnMut(&T) -> bool,
    {
        Self::prune_nodes(tree, &mut matches)
    }

    /// Pre-order, depth-annotated projection of a tree.
    #[must_use]
    pub fn flatten<T: Clone>(tree: &[TreeNode<T>]) -> Vec<FlatNode<T>> {
        let mut out = Vec::with_capacity(tree.iter().map(TreeNode::subtree_len).sum());
        let mut ancestors = Vec::new();
        Self::walk(tree, &mut ancestors, &mut out);
        out
    }

    /// Builds, flattens, and seeds the expansion state in one pass.
    ///
    /// # Errors
    ///
    /// Same as [`TreeProjector::build_tree`].
    pub fn project<R>(records: Vec<R>, config: &TreeConfig) -> Result<TreeProjection<R>, TreeError>
    where
        R: TreeRecord + Clone,
    {
        Ok(Self::project_tree(Self::build_tree(records)?, config))
    }

    /// Flattens an already built (possibly pruned) tree and seeds the
    /// expansion state.
    #[must_use]
    pub fn project_tree<T: Clone>(
        tree: Vec<TreeNode<T>>,
        config: &TreeConfig,
    ) -> TreeProjection<T> {
        let rows = Self::flatten(&tree);
        let expansion = if config.expand_all_on_load {
            ExpansionState::expand_all_with_children(&tree)
        } else {
            ExpansionState::new()
        };

        TreeProjection {
            tree,
            rows,
            expansion,
        }
    }

    fn prune_nodes<T, F>(nodes: Vec<TreeNode<T>>, matches: &mut F) -> Vec<TreeNode<T>>
    where
        F: FnMut(&T) -> bool,
    {
        nodes
            .into_iter()
            .filter_map(|mut node| {
                node.children = Self::prune_nodes(std::mem::take(&mut node.children), matches);
                (matches(&node.payload) || node.has_children()).then_some(node)
            })
            .collect()
    }

    fn walk<T: Clone>(
        nodes: &[TreeNode<T>],
        ancestors: &mut Vec<i64>,
        out: &mut Vec<FlatNode<T>>,
    ) {
        for node in nodes {
            out.push(FlatNode {
                id: node.id,
                parent_id: node.parent_id,
                depth: ancestors.len(),
                has_children: node.has_children(),
                ancestors: ancestors.clone(),
                payload: node.payload.clone(),
            });

            if node.has_children() {
                ancestors.push(node.id);
                Self::walk(&node.children, ancestors, out);
                ancestors.pop();
            }
        }
    }

    // Depth of every record; fails on the first cycle found.
    fn resolve_depths<R: TreeRecord>(
        records: &[R],
        parents: &[Option<usize>],
    ) -> Result<Vec<usize>, TreeError> {
        let mut state = vec![Visit::New; records.len()];
        let mut depths = vec![0usize; records.len()];

        for start in 0..records.len() {
            let mut path = Vec::new();
            let mut current = Some(start);
            let mut base = 0;

            while let Some(i) = current {
                match state[i] {
                    Visit::Done => {
                        base = depths[i] + 1;
                        break;
                    }
                    Visit::InPath => return Err(TreeError::Cycle { id: records[i].id() }),
                    Visit::New => {
                        state[i] = Visit::InPath;
                        path.push(i);
                        current = parents[i];
                    }
                }
            }

            // path runs child -> ancestor; assign depths from the top down.
            for (offset, i) in path.into_iter().rev().enumerate() {
                depths[i] = base + offset;
                state[i] = Visit::Done;
            }
        }

        Ok(depths)
    }
}
