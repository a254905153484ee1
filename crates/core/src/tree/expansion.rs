//! Expand/collapse state for hierarchical tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{FlatNode, TreeNode};

/// Per-screen expand/collapse map, keyed by node id.
///
/// Absent ids are collapsed. Owned by the caller and passed into the pure
/// projection functions; never shared between screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState(HashMap<i64, bool>);

impl ExpansionState {
    /// Creates an empty state (everything collapsed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every node that has at least one child as expanded.
    #[must_use]
    pub fn expand_all_with_children<T>(tree: &[TreeNode<T>]) -> Self {
        let mut state = Self::new();
        let mut stack: Vec<&TreeNode<T>> = tree.iter().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                state.0.insert(node.id, true);
                stack.extend(node.children.iter());
            }
        }
        state
    }

    /// Returns true if the node is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: i64) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    /// Sets the expansion flag for a node.
    pub fn set(&mut self, id: i64, expanded: bool) {
        self.0.insert(id, expanded);
    }

    /// Flips the flag for a node and returns the new value.
    pub fn toggle(&mut self, id: i64) -> bool {
        let expanded = !self.is_expanded(id);
        self.0.insert(id, expanded);
        expanded
    }

    /// Returns a copy of this state with the flag for `id` flipped.
    #[must_use]
    pub fn toggled(&self, id: i64) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    /// Number of expanded nodes.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.0.values().filter(|expanded| **expanded).count()
    }
}

/// Rows whose whole ancestor chain is expanded. Roots are always visible.
#[must_use]
pub fn visible_rows<'a, T>(
    flat: &'a [FlatNode<T>],
    expansion: &ExpansionState,
) -> Vec<&'a FlatNode<T>> {
    flat.iter()
        .filter(|row| row.ancestors.iter().all(|id| expansion.is_expanded(*id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_defaults_to_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded(1));
    }

    #[test]
    fn test_toggle_absent_expands() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(1));
        assert!(state.is_expanded(1));
        assert!(!state.toggle(1));
        assert!(!state.is_expanded(1));
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let state = ExpansionState::new();
        let next = state.toggled(3);
        assert!(!state.is_expanded(3));
        assert!(next.is_expanded(3));
    }

    #[test]
    fn test_expanded_count_ignores_collapsed() {
        let mut state = ExpansionState::new();
        state.set(1, true);
        state.set(2, false);
        assert_eq!(state.expanded_count(), 1);
    }

    #[test]
    fn test_serde_roundtrip_keys() {
        let mut state = ExpansionState::new();
        state.set(7, true);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"7":true}"#);
        let back: ExpansionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
