//! Higher-level edits built from actions
//!
//! These are what toolbar buttons and component control bars trigger. Each
//! one is a short sequence of dispatches; multi-step edits are batched so a
//! single undo reverts them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use mediakit_common::IdGenerator;

use crate::actions::{Action, ActionError};
use crate::model::{Component, ComponentData, Section, SectionType};
use crate::store::StateManager;

/// `data-action` values on a component's control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCommand {
    MoveUp,
    MoveDown,
    Edit,
    Duplicate,
    Delete,
}

impl ComponentCommand {
    pub const ALL: [ComponentCommand; 5] = [
        ComponentCommand::MoveUp,
        ComponentCommand::MoveDown,
        ComponentCommand::Edit,
        ComponentCommand::Duplicate,
        ComponentCommand::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCommand::MoveUp => "move-up",
            ComponentCommand::MoveDown => "move-down",
            ComponentCommand::Edit => "edit",
            ComponentCommand::Duplicate => "duplicate",
            ComponentCommand::Delete => "delete",
        }
    }

    /// Button label
    pub fn title(&self) -> &'static str {
        match self {
            ComponentCommand::MoveUp => "Move Up",
            ComponentCommand::MoveDown => "Move Down",
            ComponentCommand::Edit => "Edit",
            ComponentCommand::Duplicate => "Duplicate",
            ComponentCommand::Delete => "Delete",
        }
    }
}

impl FromStr for ComponentCommand {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentCommand::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ActionError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for ComponentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `data-action` values on a section's control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionCommand {
    Settings,
    Delete,
}

impl SectionCommand {
    pub const ALL: [SectionCommand; 2] = [SectionCommand::Settings, SectionCommand::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCommand::Settings => "section-settings",
            SectionCommand::Delete => "delete-section",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionCommand::Settings => "Section Settings",
            SectionCommand::Delete => "Delete Section",
        }
    }
}

impl FromStr for SectionCommand {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionCommand::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ActionError::UnknownType(s.to_string()))
    }
}

/// What a command did, for the caller to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "camelCase")]
pub enum CommandOutcome {
    Applied,
    /// New component created by a duplicate
    Created(String),
    /// Open an editor for this component
    Edit(Component),
    /// Open the settings panel for this section
    OpenSectionSettings(Section),
    /// Nothing to do (edge of a section, unknown id, rejected action)
    Ignored,
}

/// Add a component of `component_type`; returns its id
///
/// Targets `section_id` when given and present, else the first section.
/// With no sections at all a full-width one is created first.
pub fn add_component(
    store: &mut StateManager,
    ids: &dyn IdGenerator,
    component_type: &str,
    data: ComponentData,
    section_id: Option<&str>,
) -> Option<String> {
    let target = match section_id.filter(|id| store.state().section(id).is_some()) {
        Some(id) => id.to_string(),
        None => match store.state().sections.first() {
            Some(first) => first.section_id.clone(),
            None => {
                let new_section = ids.section_id();
                if !store.dispatch(Action::AddSection(Section::new(
                    new_section.clone(),
                    SectionType::FullWidth,
                ))) {
                    return None;
                }
                new_section
            }
        },
    };

    let id = ids.component_id(component_type);
    let component = Component::new(id.clone(), component_type, target).with_data(data);

    if store.dispatch(Action::AddComponent(component)) {
        info!(component_id = %id, component_type, "Component added");
        Some(id)
    } else {
        None
    }
}

/// Append a new empty section; returns its id
pub fn add_section(
    store: &mut StateManager,
    ids: &dyn IdGenerator,
    section_type: SectionType,
) -> Option<String> {
    let id = ids.section_id();
    store
        .dispatch(Action::AddSection(Section::new(id.clone(), section_type)))
        .then_some(id)
}

/// Swap a component with its neighbour inside its section
///
/// `delta` is -1 for up and +1 for down. Returns `false` at the edges.
pub fn move_component(store: &mut StateManager, component_id: &str, delta: isize) -> bool {
    let Some((section_index, position)) = store.state().locate(component_id) else {
        return false;
    };

    let len = store.state().sections[section_index].components.len();
    let Some(neighbour) = position.checked_add_signed(delta).filter(|n| *n < len) else {
        debug!(component_id, delta, "Component already at the edge of its section");
        return false;
    };

    let mut sections = store.state().sections.clone();
    sections[section_index].components.swap(position, neighbour);
    store.dispatch(Action::UpdateSections(sections))
}

/// Copy a component with a fresh id into the same section; returns the new id
pub fn duplicate_component(
    store: &mut StateManager,
    ids: &dyn IdGenerator,
    component_id: &str,
) -> Option<String> {
    let original = store.state().component(component_id)?.clone();
    let id = ids.component_id(&original.component_type);
    let copy = Component {
        id: id.clone(),
        ..original
    };

    store.dispatch(Action::AddComponent(copy)).then_some(id)
}

/// Remove a section together with every component it holds
pub fn remove_section(store: &mut StateManager, section_id: &str) -> bool {
    let Some(section) = store.state().section(section_id).cloned() else {
        return false;
    };

    store.begin_batch("Removed section");
    for id in &section.components {
        store.dispatch(Action::RemoveComponent(id.clone()));
    }
    let remaining: Vec<Section> = store
        .state()
        .sections
        .iter()
        .filter(|s| s.section_id != section_id)
        .cloned()
        .collect();
    let applied = store.dispatch(Action::UpdateSections(remaining));
    store.end_batch();

    if applied {
        info!(section_id, removed = section.components.len(), "Section removed");
    }
    applied
}

pub fn handle_component_command(
    store: &mut StateManager,
    ids: &dyn IdGenerator,
    command: ComponentCommand,
    component_id: &str,
) -> CommandOutcome {
    let applied = match command {
        ComponentCommand::MoveUp => move_component(store, component_id, -1),
        ComponentCommand::MoveDown => move_component(store, component_id, 1),
        ComponentCommand::Delete => {
            store.dispatch(Action::RemoveComponent(component_id.to_string()))
        }
        ComponentCommand::Duplicate => {
            return match duplicate_component(store, ids, component_id) {
                Some(id) => CommandOutcome::Created(id),
                None => CommandOutcome::Ignored,
            };
        }
        ComponentCommand::Edit => {
            return match store.state().component(component_id) {
                Some(component) => CommandOutcome::Edit(component.clone()),
                None => CommandOutcome::Ignored,
            };
        }
    };

    if applied {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}

pub fn handle_section_command(
    store: &mut StateManager,
    command: SectionCommand,
    section_id: &str,
) -> CommandOutcome {
    match command {
        SectionCommand::Delete if remove_section(store, section_id) => CommandOutcome::Applied,
        SectionCommand::Delete => CommandOutcome::Ignored,
        SectionCommand::Settings => match store.state().section(section_id) {
            Some(section) => CommandOutcome::OpenSectionSettings(section.clone()),
            None => CommandOutcome::Ignored,
        },
    }
}
