//! Level 1: Containment Tests
//!
//! Tests the containment rule and initial membership of comment nodes.

mod common;

use common::harness::GroupEditorHarness;
use node_group_editor::{contained_nodes, is_contained, Rect, SimpleNodeGeometry, Vector};

// ============================================================================
// Containment rule
// ============================================================================

#[test]
fn test_inner_rect_strictly_inside_is_contained() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(is_contained(&outer, &Rect::new(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn test_edges_touching_count_as_contained() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(is_contained(&outer, &Rect::new(0.0, 0.0, 100.0, 50.0)));
    assert!(is_contained(&outer, &Rect::new(50.0, 50.0, 50.0, 50.0)));
}

#[test]
fn test_single_corner_outside_is_not_contained() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!is_contained(&outer, &Rect::new(90.0, 10.0, 20.0, 20.0)));
    assert!(!is_contained(&outer, &Rect::new(10.0, -1.0, 20.0, 20.0)));
}

#[test]
fn test_rect_is_not_contained_in_itself() {
    let rect = Rect::new(5.0, 5.0, 40.0, 40.0);
    assert!(!is_contained(&rect, &rect));
}

#[test]
fn test_contained_nodes_skips_group_id() {
    let group = Rect::new(0.0, 0.0, 100.0, 100.0);
    let nodes = vec![
        SimpleNodeGeometry { id: 1, rect: Rect::new(10.0, 10.0, 10.0, 10.0) },
        SimpleNodeGeometry { id: 2, rect: Rect::new(200.0, 10.0, 10.0, 10.0) },
        SimpleNodeGeometry { id: 7, rect: Rect::new(20.0, 20.0, 10.0, 10.0) },
    ];
    assert_eq!(contained_nodes(7, &group, nodes), vec![1]);
}

// ============================================================================
// Initial membership
// ============================================================================

#[test]
fn test_comment_collects_nodes_inside() {
    let harness = GroupEditorHarness::with_comment();
    assert_eq!(harness.members(10), vec![1, 2]);
}

#[test]
fn test_offsets_are_relative_to_comment() {
    let harness = GroupEditorHarness::with_comment();
    let graph = harness.ctrl.graph();
    let graph = graph.borrow();
    assert_eq!(graph.member_offset(10, 1), Some(Vector::new(20.0, 40.0)));
    assert_eq!(graph.member_offset(10, 2), Some(Vector::new(200.0, 120.0)));
    assert_eq!(graph.member_offset(10, 3), None);
}

#[test]
fn test_node_added_later_joins() {
    let harness = GroupEditorHarness::with_comment();
    harness.add_node(4, 50.0, 200.0, 80.0, 40.0);

    assert_eq!(harness.members(10), vec![1, 2, 4]);
    assert_eq!(harness.tracker.joined(), vec![(10, 4)]);
}

#[test]
fn test_node_straddling_border_is_not_member() {
    let harness = GroupEditorHarness::with_comment();
    harness.add_node(4, 350.0, 10.0, 100.0, 40.0);
    assert!(!harness.members(10).contains(&4));
}

#[test]
fn test_comment_does_not_contain_itself() {
    let harness = GroupEditorHarness::new();
    harness.add_comment(10, 0.0, 0.0, 100.0, 100.0);
    harness.add_comment(11, 0.0, 0.0, 100.0, 100.0);

    // Two comments with identical rectangles never contain each other
    assert!(harness.members(10).is_empty());
    assert!(harness.members(11).is_empty());
}
