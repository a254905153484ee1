//! Integration tests for hierarchy projection.
//!
//! Feeds backend-shaped JSON through the public projector API.

use medistock_core::tree::{FlatNode, NodeRecord, TreeError, TreeProjector, visible_rows};
use medistock_shared::config::TreeConfig;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Location {
    name: String,
    #[serde(default = "active")]
    is_active: bool,
}

fn active() -> bool {
    true
}

type LocationRecord = NodeRecord<Location>;

fn locations() -> Vec<LocationRecord> {
    let json = r#"[
        { "id": 4, "parent_id": 2, "name": "Shelf A1" },
        { "id": 1, "parent_id": null, "name": "Main Store" },
        { "id": 2, "parent_id": 1, "name": "Rack A" },
        { "id": 3, "parent_id": 1, "name": "Rack B", "is_active": false },
        { "id": 5, "parent_id": 3, "name": "Shelf B1" },
        { "id": 6, "parent_id": 42, "name": "Cold Room" },
        { "id": 7, "name": "Dispatch" }
    ]"#;
    serde_json::from_str(json).unwrap()
}

fn names<'a>(rows: impl IntoIterator<Item = &'a FlatNode<LocationRecord>>) -> Vec<&'a str> {
    rows.into_iter().map(|row| row.payload.payload.name.as_str()).collect()
}

// ============================================================================
// Test 1: Build and flatten a location hierarchy
// ============================================================================
#[test]
fn test_project_locations() {
    let projection = TreeProjector::project(locations(), &TreeConfig::default()).unwrap();

    assert_eq!(projection.tree.len(), 3, "Main Store, Cold Room (orphan), Dispatch");
    assert_eq!(
        names(&projection.rows),
        vec!["Main Store", "Rack A", "Shelf A1", "Rack B", "Shelf B1", "Cold Room", "Dispatch"]
    );

    let depths: Vec<usize> = projection.rows.iter().map(|row| row.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 1, 2, 0, 0]);

    let cold_room = &projection.rows[5];
    assert!(cold_room.is_root());
    assert_eq!(cold_room.parent_id, None);
    assert_eq!(cold_room.payload.parent_id, Some(42));
}

// ============================================================================
// Test 2: Expand-all seeding and collapsing a mid-level node
// ============================================================================
#[test]
fn test_collapse_hides_grandchildren() {
    let mut projection = TreeProjector::project(locations(), &TreeConfig::default()).unwrap();
    assert_eq!(projection.visible().len(), 7);

    // Collapse Main Store: Rack A stays expanded but Shelf A1 must still hide.
    assert!(!projection.toggle(1));
    assert_eq!(names(projection.visible()), vec!["Main Store", "Cold Room", "Dispatch"]);

    assert!(projection.toggle(1));
    projection.toggle(2);
    assert_eq!(
        names(projection.visible()),
        vec!["Main Store", "Rack A", "Rack B", "Shelf B1", "Cold Room", "Dispatch"]
    );
}

// ============================================================================
// Test 3: Starting collapsed when expand-all is disabled
// ============================================================================
#[test]
fn test_start_collapsed() {
    let config = TreeConfig {
        expand_all_on_load: false,
    };
    let projection = TreeProjector::project(locations(), &config).unwrap();
    assert_eq!(names(projection.visible()), vec!["Main Store", "Cold Room", "Dispatch"]);
}

// ============================================================================
// Test 4: Filtering inactive locations promotes their children
// ============================================================================
#[test]
fn test_filter_inactive() {
    let tree =
        TreeProjector::build_tree_filtered(locations(), |record| record.payload.is_active).unwrap();
    let rows = TreeProjector::flatten(&tree);

    assert_eq!(
        names(&rows),
        vec!["Main Store", "Rack A", "Shelf A1", "Shelf B1", "Cold Room", "Dispatch"]
    );
    let shelf_b1 = rows.iter().find(|row| row.id == 5).unwrap();
    assert_eq!(shelf_b1.depth, 0);
}

// ============================================================================
// Test 5: Structural errors
// ============================================================================
#[test]
fn test_structural_errors() {
    let mut records = locations();
    records.push(NodeRecord::new(
        2,
        None,
        Location {
            name: "Duplicate".to_string(),
            is_active: true,
        },
    ));
    assert_eq!(
        TreeProjector::build_tree(records).unwrap_err(),
        TreeError::DuplicateId { id: 2 }
    );

    let mut records = locations();
    records[1].parent_id = Some(4);
    assert!(matches!(TreeProjector::build_tree(records), Err(TreeError::Cycle { .. })));
}

// ============================================================================
// Test 6: Empty input
// ============================================================================
#[test]
fn test_empty_input() {
    let tree = TreeProjector::build_tree(Vec::<LocationRecord>::new()).unwrap();
    let rows = TreeProjector::flatten(&tree);
    assert!(tree.is_empty());
    assert!(visible_rows(&rows, &Default::default()).is_empty());
}

// ============================================================================
// Test 7: Searching keeps each match under its full ancestor chain
// ============================================================================
#[test]
fn test_search_keeps_ancestors() {
    let tree = TreeProjector::build_tree(locations()).unwrap();
    let matches = |record: &LocationRecord| record.payload.name.to_lowercase().contains("shelf");
    let pruned = TreeProjector::prune(tree, matches);
    let projection = TreeProjector::project_tree(pruned, &TreeConfig::default());

    assert_eq!(
        names(projection.visible()),
        vec!["Main Store", "Rack A", "Shelf A1", "Rack B", "Shelf B1"]
    );
    let depths: Vec<usize> = projection.rows.iter().map(|row| row.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 1, 2]);

    let tree = TreeProjector::build_tree(locations()).unwrap();
    assert!(TreeProjector::prune(tree, |record| record.payload.name == "Freezer").is_empty());
}
