//! Action semantics through the StateManager
//!
//! This tests:
//! - Section/component wiring on add
//! - Cascading removes
//! - Section list validation
//! - SET_STATE merge and repair
//! - File round trip

use mediakit_editor::{
    Action, ActionError, Component, ComponentUpdate, LayoutState, Section, SectionType,
    StatePatch, StateManager,
};
use serde_json::json;

fn store_with(sections: &[&str]) -> StateManager {
    let mut store = StateManager::default();
    for id in sections {
        assert!(store.dispatch(Action::AddSection(Section::new(*id, SectionType::FullWidth))));
    }
    store
}

#[test]
fn test_add_section_then_component() {
    let mut store = store_with(&["s1"]);
    assert!(store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1"))));

    assert_eq!(store.state().sections[0].components, vec!["c1"]);
    assert_eq!(store.state().components["c1"].section_id, "s1");
}

#[test]
fn test_duplicate_component_rejected() {
    let mut store = store_with(&["s1"]);
    store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));

    let err = store
        .try_dispatch(Action::AddComponent(Component::new("c1", "topics", "s1")))
        .unwrap_err();
    assert_eq!(err, ActionError::DuplicateComponent("c1".into()));
    assert_eq!(store.state().components["c1"].component_type, "hero");
    assert_eq!(store.state().sections[0].components.len(), 1);
}

#[test]
fn test_remove_component_cascades() {
    let mut store = store_with(&["s1", "s2"]);
    store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));
    store.dispatch(Action::AddComponent(Component::new("c2", "contact", "s2")));

    assert!(store.dispatch(Action::RemoveComponent("c1".into())));

    assert!(!store.state().has_component("c1"));
    assert!(store.state().sections[0].components.is_empty());
    assert_eq!(store.state().sections[1].components, vec!["c2"]);
    assert!(store.state().dangling_references().is_empty());
}

#[test]
fn test_update_component_merges_shallowly() {
    let mut store = store_with(&["s1"]);
    let original = Component::new("c1", "hero", "s1")
        .with_field("title", "Jane")
        .with_field("subtitle", "Author");
    store.dispatch(Action::AddComponent(original));

    let data = json!({ "title": "Dr. Jane" }).as_object().cloned().unwrap();
    assert!(store.dispatch(Action::UpdateComponent {
        id: "c1".into(),
        updates: ComponentUpdate::data(data),
    }));

    let component = &store.state().components["c1"];
    assert_eq!(component.component_type, "hero");
    assert_eq!(component.data["title"], "Dr. Jane");
    assert!(component.data.get("subtitle").is_none());

    assert!(store.dispatch(Action::UpdateComponent {
        id: "c1".into(),
        updates: ComponentUpdate {
            component_type: Some("cta".into()),
            data: None,
        },
    }));
    assert_eq!(store.state().components["c1"].component_type, "cta");
    assert_eq!(store.state().components["c1"].data["title"], "Dr. Jane");
}

#[test]
fn test_update_sections_moves_between_sections() {
    let mut store = store_with(&["s1", "s2"]);
    store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));

    let sections = vec![
        Section::new("s1", SectionType::FullWidth),
        Section::new("s2", SectionType::FullWidth).with_components(["c1"]),
    ];
    assert!(store.dispatch(Action::UpdateSections(sections)));
    assert_eq!(store.state().components["c1"].section_id, "s2");
}

#[test]
fn test_update_sections_rejects_bad_lists() {
    let mut store = store_with(&["s1"]);
    store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));
    let before = store.snapshot();

    let dangling = vec![Section::new("s1", SectionType::FullWidth).with_components(["c1", "ghost"])];
    assert!(matches!(
        store.try_dispatch(Action::UpdateSections(dangling)),
        Err(ActionError::DanglingReference { .. })
    ));

    let twice = vec![
        Section::new("s1", SectionType::FullWidth).with_components(["c1"]),
        Section::new("s2", SectionType::FullWidth).with_components(["c1"]),
    ];
    assert_eq!(
        store.try_dispatch(Action::UpdateSections(twice)),
        Err(ActionError::DuplicateReference("c1".into()))
    );

    let same_id = vec![
        Section::new("s1", SectionType::FullWidth),
        Section::new("s1", SectionType::TwoColumn),
    ];
    assert_eq!(
        store.try_dispatch(Action::UpdateSections(same_id)),
        Err(ActionError::DuplicateSection("s1".into()))
    );

    assert_eq!(store.state(), &before);
}

#[test]
fn test_set_state_merges_and_repairs() {
    let mut store = store_with(&["s1"]);
    store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));

    let patch = StatePatch {
        sections: Some(vec![
            Section::new("s9", SectionType::ThreeColumn).with_components(["c1", "gone"]),
        ]),
        theme: Some("minimal_elegant".into()),
        ..StatePatch::default()
    };
    assert!(store.dispatch(Action::SetState(patch)));

    let state = store.state();
    assert_eq!(state.theme, "minimal_elegant");
    assert_eq!(state.sections[0].components, vec!["c1"]);
    assert_eq!(state.components["c1"].section_id, "s9");
}

#[test]
fn test_set_state_from_wire() {
    let mut store = StateManager::default();
    let applied = store.dispatch_value(json!({
        "type": "SET_STATE",
        "payload": {
            "components": { "a": { "id": "a", "type": "topics", "data": {}, "sectionId": "x" } },
            "sections": [ { "section_id": "x", "type": "full_width", "components": ["a"] } ]
        }
    }));

    assert!(applied);
    assert_eq!(store.state().theme, "default");
    assert_eq!(store.state().sections[0].components, vec!["a"]);
}

#[test]
fn test_save_and_load_file() -> anyhow::Result<()> {
    let mut store = store_with(&["s1"]);
    store.dispatch(Action::AddComponent(
        Component::new("c1", "biography", "s1").with_field("text", "Hello <world>"),
    ));

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("layout.json");
    store.state().save(&path)?;

    let loaded = LayoutState::load(&path)?;
    assert_eq!(&loaded, store.state());
    Ok(())
}
