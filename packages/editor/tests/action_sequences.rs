//! Property tests over random action sequences
//!
//! This tests:
//! - Key set of the component map after add/remove chains
//! - Referential integrity after every dispatch
//! - Undo walking back to the empty layout

use std::collections::BTreeSet;

use mediakit_editor::{Action, Component, Section, SectionType, StateManager};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0u8..16).prop_map(Op::Add), (0u8..16).prop_map(Op::Remove)]
}

fn seeded_store() -> StateManager {
    let mut store = StateManager::with_history_limit(Default::default(), 0);
    store.dispatch(Action::AddSection(Section::new("s1", SectionType::FullWidth)));
    store.dispatch(Action::AddSection(Section::new("s2", SectionType::TwoColumn)));
    store
}

proptest! {
    #[test]
    fn component_keys_track_adds_minus_removes(ops in prop::collection::vec(op(), 0..64)) {
        let mut store = seeded_store();
        let mut expected = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(n) => {
                    let id = format!("c{}", n);
                    let section = if n % 2 == 0 { "s1" } else { "s2" };
                    let applied = store.dispatch(Action::AddComponent(Component::new(id.clone(), "hero", section)));
                    prop_assert_eq!(applied, expected.insert(id));
                }
                Op::Remove(n) => {
                    let id = format!("c{}", n);
                    let applied = store.dispatch(Action::RemoveComponent(id.clone()));
                    prop_assert_eq!(applied, expected.remove(&id));
                }
            }

            let state = store.state();
            let keys: BTreeSet<String> = state.components.keys().cloned().collect();
            prop_assert_eq!(&keys, &expected);
            prop_assert!(state.dangling_references().is_empty());
            prop_assert!(state.orphaned_components().is_empty());
        }
    }

    #[test]
    fn undo_everything_returns_to_start(ops in prop::collection::vec(op(), 1..32)) {
        let mut store = seeded_store();
        let start = store.snapshot();

        for op in ops {
            match op {
                Op::Add(n) => store.dispatch(Action::AddComponent(Component::new(format!("c{}", n), "topics", "s1"))),
                Op::Remove(n) => store.dispatch(Action::RemoveComponent(format!("c{}", n))),
            };
        }

        while store.history().can_undo() && store.state() != &start {
            store.undo();
        }
        prop_assert_eq!(store.state().components.len(), start.components.len());
        prop_assert_eq!(&store.state().sections, &start.sections);
    }
}
