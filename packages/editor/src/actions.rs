//! # Layout Actions
//!
//! Every change to a [`LayoutState`] goes through an [`Action`].
//!
//! ## Action Semantics
//!
//! ### ADD_COMPONENT
//! - Inserts the component and appends its id to the section named by `sectionId`
//! - Fails on a duplicate id or an unknown section
//!
//! ### REMOVE_COMPONENT
//! - Deletes the component and every section reference to it
//!
//! ### UPDATE_COMPONENT
//! - Shallow merge: a present `type` replaces the type, a present `data` replaces the whole map
//!
//! ### ADD_SECTION / UPDATE_SECTIONS
//! - Section ids are unique, references must resolve, a component sits in at most one section
//! - Referenced components get their `sectionId` rewritten to the holding section
//!
//! ### SET_THEME
//! - Replaces the theme id; unknown ids are resolved by the renderer
//!
//! ### SET_STATE
//! - Shallow merge of the provided top-level fields, then reference repair
//!
//! Validation runs before anything is touched, so a rejected action leaves the
//! state exactly as it was.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::model::{Component, ComponentData, ComponentMap, LayoutState, Section};

/// A state transition, serialized as `{ "type": "...", "payload": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddComponent(Component),

    RemoveComponent(String),

    UpdateComponent {
        id: String,
        updates: ComponentUpdate,
    },

    AddSection(Section),

    UpdateSections(Vec<Section>),

    SetTheme(String),

    SetState(StatePatch),
}

/// Partial component replacement carried by UPDATE_COMPONENT
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentUpdate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ComponentData>,
}

impl ComponentUpdate {
    pub fn data(data: ComponentData) -> Self {
        Self {
            component_type: None,
            data: Some(data),
        }
    }
}

/// Top-level fields carried by SET_STATE; absent fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(
        rename = "globalSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub global_settings: Option<serde_json::Map<String, Value>>,
}

impl From<LayoutState> for StatePatch {
    fn from(state: LayoutState) -> Self {
        Self {
            components: Some(state.components),
            sections: Some(state.sections),
            theme: Some(state.theme),
            global_settings: Some(state.global_settings),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Component already exists: {0}")]
    DuplicateComponent(String),

    #[error("Section already exists: {0}")]
    DuplicateSection(String),

    #[error("Section {section_id} references missing component {component_id}")]
    DanglingReference {
        section_id: String,
        component_id: String,
    },

    #[error("Component {0} is referenced by more than one section")]
    DuplicateReference(String),

    #[error("Unknown action type: {0}")]
    UnknownType(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

pub const ACTION_TYPES: &[&str] = &[
    "ADD_COMPONENT",
    "REMOVE_COMPONENT",
    "UPDATE_COMPONENT",
    "ADD_SECTION",
    "UPDATE_SECTIONS",
    "SET_THEME",
    "SET_STATE",
];

impl Action {
    /// Parse an action object, telling unknown types apart from malformed payloads
    pub fn from_value(value: Value) -> Result<Self, ActionError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ActionError::InvalidPayload("missing action type".to_string()))?;

        if !ACTION_TYPES.contains(&kind) {
            return Err(ActionError::UnknownType(kind.to_string()));
        }

        serde_json::from_value(value).map_err(|e| ActionError::InvalidPayload(e.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self, ActionError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| ActionError::InvalidPayload(e.to_string()))?;
        Self::from_value(value)
    }

    /// Wire name of the action type
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddComponent(_) => "ADD_COMPONENT",
            Action::RemoveComponent(_) => "REMOVE_COMPONENT",
            Action::UpdateComponent { .. } => "UPDATE_COMPONENT",
            Action::AddSection(_) => "ADD_SECTION",
            Action::UpdateSections(_) => "UPDATE_SECTIONS",
            Action::SetTheme(_) => "SET_THEME",
            Action::SetState(_) => "SET_STATE",
        }
    }

    /// Label shown next to undo/redo
    pub fn description(&self) -> &'static str {
        match self {
            Action::AddComponent(_) => "Added component",
            Action::RemoveComponent(_) => "Removed component",
            Action::UpdateComponent { .. } => "Updated component",
            Action::AddSection(_) => "Added section",
            Action::UpdateSections(_) => "Rearranged sections",
            Action::SetTheme(_) => "Changed theme",
            Action::SetState(_) => "Loaded layout",
        }
    }

    /// Check the action against the current state without touching it
    pub fn validate(&self, state: &LayoutState) -> Result<(), ActionError> {
        match self {
            Action::AddComponent(component) => {
                if component.id.is_empty() {
                    return Err(ActionError::InvalidPayload("component id is empty".to_string()));
                }
                if state.has_component(&component.id) {
                    return Err(ActionError::DuplicateComponent(component.id.clone()));
                }
                if state.section(&component.section_id).is_none() {
                    return Err(ActionError::SectionNotFound(component.section_id.clone()));
                }
                Ok(())
            }

            Action::RemoveComponent(id) => {
                if !state.has_component(id) {
                    return Err(ActionError::ComponentNotFound(id.clone()));
                }
                Ok(())
            }

            Action::UpdateComponent { id, .. } => {
                if !state.has_component(id) {
                    return Err(ActionError::ComponentNotFound(id.clone()));
                }
                Ok(())
            }

            Action::AddSection(section) => {
                if section.section_id.is_empty() {
                    return Err(ActionError::InvalidPayload("section id is empty".to_string()));
                }
                if state.section(&section.section_id).is_some() {
                    return Err(ActionError::DuplicateSection(section.section_id.clone()));
                }

                let mut seen = HashSet::new();
                for id in &section.components {
                    if !state.has_component(id) {
                        return Err(ActionError::DanglingReference {
                            section_id: section.section_id.clone(),
                            component_id: id.clone(),
                        });
                    }
                    if !seen.insert(id.as_str()) || state.locate(id).is_some() {
                        return Err(ActionError::DuplicateReference(id.clone()));
                    }
                }
                Ok(())
            }

            Action::UpdateSections(sections) => validate_sections(state, sections),

            Action::SetTheme(theme) => {
                if theme.is_empty() {
                    return Err(ActionError::InvalidPayload("theme id is empty".to_string()));
                }
                Ok(())
            }

            // Whatever SET_STATE leaves inconsistent is repaired after the merge
            Action::SetState(_) => Ok(()),
        }
    }

    /// Apply the action with validation
    pub fn apply(&self, state: &mut LayoutState) -> Result<(), ActionError> {
        self.validate(state)?;

        match self {
            Action::AddComponent(component) => {
                if let Some(section) = state.section_mut(&component.section_id) {
                    if !section.contains(&component.id) {
                        section.components.push(component.id.clone());
                    }
                }
                state
                    .components
                    .insert(component.id.clone(), component.clone());
            }

            Action::RemoveComponent(id) => {
                state.components.shift_remove(id);
                for section in &mut state.sections {
                    section.components.retain(|c| c != id);
                }
            }

            Action::UpdateComponent { id, updates } => {
                if let Some(component) = state.components.get_mut(id) {
                    if let Some(component_type) = &updates.component_type {
                        component.component_type = component_type.clone();
                    }
                    if let Some(data) = &updates.data {
                        component.data = data.clone();
                    }
                }
            }

            Action::AddSection(section) => {
                state.sections.push(section.clone());
                state.sync_section_ids();
            }

            Action::UpdateSections(sections) => {
                state.sections = sections.clone();
                state.sync_section_ids();
            }

            Action::SetTheme(theme) => {
                state.theme = theme.clone();
            }

            Action::SetState(patch) => {
                if let Some(components) = &patch.components {
                    state.components = components.clone();
                }
                if let Some(sections) = &patch.sections {
                    state.sections = sections.clone();
                }
                if let Some(theme) = &patch.theme {
                    state.theme = theme.clone();
                }
                if let Some(settings) = &patch.global_settings {
                    state.global_settings = settings.clone();
                }

                let report = state.repair();
                if !report.is_clean() {
                    warn!(
                        dangling = ?report.dangling,
                        duplicates = ?report.duplicates,
                        "SET_STATE carried inconsistent references"
                    );
                }
            }
        }

        Ok(())
    }
}

fn validate_sections(state: &LayoutState, sections: &[Section]) -> Result<(), ActionError> {
    let mut section_ids = HashSet::new();
    let mut referenced = HashSet::new();

    for section in sections {
        if !section_ids.insert(section.section_id.as_str()) {
            return Err(ActionError::DuplicateSection(section.section_id.clone()));
        }
        for id in &section.components {
            if !state.has_component(id) {
                return Err(ActionError::DanglingReference {
                    section_id: section.section_id.clone(),
                    component_id: id.clone(),
                });
            }
            if !referenced.insert(id.as_str()) {
                return Err(ActionError::DuplicateReference(id.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionType;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let action = Action::RemoveComponent("hero_1".into());
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({ "type": "REMOVE_COMPONENT", "payload": "hero_1" }));

        let update: Action = serde_json::from_value(json!({
            "type": "UPDATE_COMPONENT",
            "payload": { "id": "hero_1", "updates": { "data": { "title": "Hi" } } }
        }))
        .unwrap();
        match update {
            Action::UpdateComponent { id, updates } => {
                assert_eq!(id, "hero_1");
                assert!(updates.component_type.is_none());
                assert_eq!(updates.data.unwrap()["title"], "Hi");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_distinguished() {
        let err = Action::from_value(json!({ "type": "MAKE_COFFEE", "payload": {} })).unwrap_err();
        assert_eq!(err, ActionError::UnknownType("MAKE_COFFEE".into()));

        let err = Action::from_value(json!({ "type": "SET_THEME", "payload": 42 })).unwrap_err();
        assert!(matches!(err, ActionError::InvalidPayload(_)));

        let err = Action::from_value(json!({ "payload": 1 })).unwrap_err();
        assert!(matches!(err, ActionError::InvalidPayload(_)));
    }

    #[test]
    fn test_add_component_requires_section() {
        let state = LayoutState::new();
        let action = Action::AddComponent(Component::new("c1", "hero", "missing"));
        assert_eq!(
            action.validate(&state),
            Err(ActionError::SectionNotFound("missing".into()))
        );
    }

    #[test]
    fn test_add_section_rejects_reference_held_elsewhere() {
        let mut state = LayoutState::new();
        Action::AddSection(Section::new("s1", SectionType::FullWidth))
            .apply(&mut state)
            .unwrap();
        Action::AddComponent(Component::new("c1", "hero", "s1"))
            .apply(&mut state)
            .unwrap();

        let err = Action::AddSection(Section::new("s2", SectionType::TwoColumn).with_components(["c1"]))
            .apply(&mut state)
            .unwrap_err();
        assert_eq!(err, ActionError::DuplicateReference("c1".into()));
        assert_eq!(state.sections.len(), 1);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Action::SetTheme("x".into()).description(), "Changed theme");
        assert_eq!(
            Action::AddComponent(Component::new("a", "b", "c")).description(),
            "Added component"
        );
    }
}
