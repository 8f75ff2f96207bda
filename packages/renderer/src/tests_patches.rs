/// Patch tests driven by real layout edits
///
/// Every diff between two renders, applied to the first render, must give
/// back the second one exactly.
use crate::renderer::Renderer;
use crate::vdom_differ::{apply_patches, diff_vdocument, VDocPatch};
use mediakit_common::{IdGenerator, SequentialIdGenerator};
use mediakit_editor::{commands, Action, ComponentData, DropPosition, SectionType, StateManager};
use proptest::prelude::*;

fn seeded(count: usize, ids: &SequentialIdGenerator) -> (StateManager, Vec<String>) {
    let mut store = StateManager::default();
    let types = ["hero", "biography", "topics", "contact", "cta", "testimonials"];
    let created = (0..count)
        .filter_map(|i| {
            commands::add_component(&mut store, ids, types[i % types.len()], ComponentData::new(), None)
        })
        .collect();
    (store, created)
}

#[test]
fn test_reorder_produces_move_not_rebuild() {
    let (mut store, ids) = seeded(4, &SequentialIdGenerator::new());
    let renderer = Renderer::default();
    let before = renderer.render(store.state());

    let sections = mediakit_editor::drag::move_component(store.state(), &ids[3], &ids[0], DropPosition::Before).unwrap();
    store.dispatch(Action::UpdateSections(sections));
    let after = renderer.render(store.state());

    let patches = diff_vdocument(&before, &after);
    assert_eq!(patches.len(), 1, "{:?}", patches);
    assert!(matches!(patches[0], VDocPatch::MoveNode { from: 3, to: 0, .. }));
    assert_eq!(apply_patches(&before, &patches).unwrap(), after);
}

#[test]
fn test_theme_change_touches_root_and_styles_only() {
    let (mut store, _) = seeded(3, &SequentialIdGenerator::new());
    let renderer = Renderer::default();
    let before = renderer.render(store.state());

    store.dispatch(Action::SetTheme("creative_bold".into()));
    let after = renderer.render(store.state());

    let patches = diff_vdocument(&before, &after);
    assert!(patches.iter().all(|p| matches!(
        p,
        VDocPatch::UpdateAttributes { path, .. } if path == &vec![0]
    ) || matches!(p, VDocPatch::RemoveStyleRule { .. } | VDocPatch::AddStyleRule { .. })));
    assert_eq!(apply_patches(&before, &patches).unwrap(), after);
}

#[derive(Debug, Clone)]
enum Edit {
    Add(usize),
    Remove(usize),
    Duplicate(usize),
    MoveUp(usize),
    NewSection,
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..6).prop_map(Edit::Add),
        (0usize..8).prop_map(Edit::Remove),
        (0usize..8).prop_map(Edit::Duplicate),
        (0usize..8).prop_map(Edit::MoveUp),
        Just(Edit::NewSection),
    ]
}

proptest! {
    #[test]
    fn patches_reproduce_next_render(edits in prop::collection::vec(edit(), 1..20)) {
        let ids = SequentialIdGenerator::new();
        let (mut store, _) = seeded(3, &ids);
        let renderer = Renderer::default();
        let types = ["hero", "biography", "topics", "contact", "cta", "stats"];

        let mut previous = renderer.render(store.state());
        for edit in edits {
            let existing: Vec<String> = store.state().components.keys().cloned().collect();
            let pick = |n: usize| existing.get(n % existing.len().max(1)).cloned();
            match edit {
                Edit::Add(t) => {
                    let id = ids.component_id(types[t]);
                    let section = store.state().sections.last().map(|s| s.section_id.clone());
                    if let Some(section) = section {
                        store.dispatch(Action::AddComponent(mediakit_editor::Component::new(id, types[t], section)));
                    }
                }
                Edit::Remove(n) => {
                    if let Some(id) = pick(n) {
                        store.dispatch(Action::RemoveComponent(id));
                    }
                }
                Edit::Duplicate(n) => {
                    if let Some(id) = pick(n) {
                        commands::duplicate_component(&mut store, &ids, &id);
                    }
                }
                Edit::MoveUp(n) => {
                    if let Some(id) = pick(n) {
                        commands::move_component(&mut store, &id, -1);
                    }
                }
                Edit::NewSection => {
                    commands::add_section(&mut store, &ids, SectionType::ThreeColumn);
                }
            }

            let next = renderer.render(store.state());
            let patches = diff_vdocument(&previous, &next);
            prop_assert_eq!(apply_patches(&previous, &patches).unwrap(), next.clone());
            previous = next;
        }
    }
}
