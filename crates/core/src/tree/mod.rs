//! Hierarchy projection for categories, accounts, and locations.
//!
//! This module implements the single tree projector shared by every
//! hierarchical screen:
//! - Flat parent-pointer list -> nested tree (orphans promoted to roots)
//! - Nested tree -> depth-annotated pre-order rows
//! - Expand/collapse state and ancestor-aware row visibility
//! - Structural validation (duplicate ids, cycles)

pub mod error;
pub mod expansion;
pub mod projector;
pub mod types;


pub use error::TreeError;
pub use expansion::{ExpansionState, visible_rows};
pub use projector::{TreeProjection, TreeProjector};
pub use types::{FlatNode, NodeRecord, TreeNode, TreeRecord};
