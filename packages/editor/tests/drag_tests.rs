//! Drag and drop gestures end to end
//!
//! This tests:
//! - Library drops creating components
//! - Reorders inside and across sections
//! - Foreign payloads and cancelled gestures

use mediakit_common::SequentialIdGenerator;
use mediakit_editor::{
    Action, Component, DragDropCoordinator, DragPayload, DropPosition, LibraryDragState,
    ReorderState, Section, SectionType, StateManager, TargetBounds,
};

const BOUNDS: TargetBounds = TargetBounds {
    top: 100.0,
    height: 50.0,
};
const UPPER_HALF: f64 = 110.0;
const LOWER_HALF: f64 = 140.0;

fn store_with_components(section: &str, ids: &[&str]) -> StateManager {
    let mut store = StateManager::default();
    store.dispatch(Action::AddSection(Section::new(section, SectionType::FullWidth)));
    for id in ids {
        store.dispatch(Action::AddComponent(Component::new(*id, "hero", section)));
    }
    store
}

fn order(store: &StateManager, section: usize) -> Vec<String> {
    store.state().sections[section].components.clone()
}

#[test]
fn test_library_drop_into_empty_layout() {
    let mut store = StateManager::default();
    let ids = SequentialIdGenerator::new();
    let mut dnd = DragDropCoordinator::new();

    let payload = dnd.begin_library_drag("topics");
    let id = dnd.drop_from_library(&payload, None, &mut store, &ids).unwrap();

    assert_eq!(store.state().sections.len(), 1);
    assert_eq!(store.state().components[&id].component_type, "topics");
    assert_eq!(dnd.library_state(), &LibraryDragState::Idle);
}

#[test]
fn test_library_drop_with_foreign_payload_is_ignored() {
    let mut store = StateManager::default();
    let ids = SequentialIdGenerator::new();
    let mut dnd = DragDropCoordinator::new();

    dnd.begin_library_drag("hero");
    let foreign = DragPayload {
        text: Some("https://example.com".into()),
        ..DragPayload::default()
    };

    assert!(dnd.drop_from_library(&foreign, None, &mut store, &ids).is_none());
    assert!(store.state().is_empty());
    assert!(!dnd.is_dragging());
}

#[test]
fn test_drop_without_drag_is_ignored() {
    let mut store = StateManager::default();
    let ids = SequentialIdGenerator::new();
    let mut dnd = DragDropCoordinator::new();

    let payload = DragPayload::library("hero");
    assert!(dnd.drop_from_library(&payload, None, &mut store, &ids).is_none());
    assert!(store.state().is_empty());
}

#[test]
fn test_drag_last_before_first() {
    let mut store = store_with_components("s1", &["c0", "c1", "c2"]);
    let mut dnd = DragDropCoordinator::new();

    let payload = dnd.begin_reorder("c2");
    assert_eq!(dnd.drag_over("c0", BOUNDS, UPPER_HALF), Some(DropPosition::Before));
    assert!(dnd.drop_reorder(&payload, &mut store));

    assert_eq!(order(&store, 0), vec!["c2", "c0", "c1"]);
    assert_eq!(dnd.reorder_state(), &ReorderState::Idle);
}

#[test]
fn test_drop_on_own_slot_is_noop() {
    let mut store = store_with_components("s1", &["c0", "c1", "c2"]);
    let mut dnd = DragDropCoordinator::new();
    let version = store.version();

    let payload = dnd.begin_reorder("c1");
    dnd.drag_over("c0", BOUNDS, LOWER_HALF);
    assert!(!dnd.drop_reorder(&payload, &mut store));

    assert_eq!(order(&store, 0), vec!["c0", "c1", "c2"]);
    assert_eq!(store.version(), version);
}

#[test]
fn test_last_valid_target_wins() {
    let mut store = store_with_components("s1", &["c0", "c1", "c2"]);
    let mut dnd = DragDropCoordinator::new();

    let payload = dnd.begin_reorder("c0");
    dnd.drag_over("c1", BOUNDS, UPPER_HALF);
    dnd.drag_over("c2", BOUNDS, LOWER_HALF);
    // Hovering itself does not clear the last target
    dnd.drag_over("c0", BOUNDS, UPPER_HALF);
    assert!(dnd.drop_reorder(&payload, &mut store));

    assert_eq!(order(&store, 0), vec!["c1", "c2", "c0"]);
}

#[test]
fn test_drop_on_container_moves_to_end() {
    let mut store = store_with_components("s1", &["c0", "c1", "c2"]);
    let mut dnd = DragDropCoordinator::new();

    let payload = dnd.begin_reorder("c0");
    assert!(dnd.drop_on_container(&payload, "s1", &mut store));
    assert_eq!(order(&store, 0), vec!["c1", "c2", "c0"]);
}

#[test]
fn test_cross_section_move() {
    let mut store = store_with_components("s1", &["a", "b"]);
    store.dispatch(Action::AddSection(Section::new("s2", SectionType::TwoColumn)));
    store.dispatch(Action::AddComponent(Component::new("x", "cta", "s2")));
    let mut dnd = DragDropCoordinator::new();

    let payload = dnd.begin_reorder("a");
    dnd.drag_over("x", BOUNDS, UPPER_HALF);
    assert!(dnd.drop_reorder(&payload, &mut store));

    assert_eq!(order(&store, 0), vec!["b"]);
    assert_eq!(order(&store, 1), vec!["a", "x"]);
    assert_eq!(store.state().components["a"].section_id, "s2");
}

#[test]
fn test_mismatched_reorder_payload_is_ignored() {
    let mut store = store_with_components("s1", &["c0", "c1"]);
    let mut dnd = DragDropCoordinator::new();

    dnd.begin_reorder("c0");
    dnd.drag_over("c1", BOUNDS, LOWER_HALF);
    assert!(!dnd.drop_reorder(&DragPayload::reorder("c1"), &mut store));
    assert_eq!(order(&store, 0), vec!["c0", "c1"]);
}

#[test]
fn test_cancel_resets_state() {
    let mut dnd = DragDropCoordinator::new();
    dnd.begin_reorder("c0");
    dnd.begin_library_drag("hero");
    assert!(dnd.is_dragging());

    dnd.cancel_reorder();
    dnd.end_library_drag();
    assert!(!dnd.is_dragging());
}
