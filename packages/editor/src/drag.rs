//! # Drag and Drop
//!
//! Two independent gestures share one coordinator:
//!
//! ```text
//! library drag:   Idle ─begin_library_drag(type)→ Dragging{type} ─drop/end→ Idle
//! reorder drag:   Idle ─begin_reorder(id)→ Dragging{id, last_target} ─drop/cancel→ Idle
//! ```
//!
//! The coordinator only tracks gesture state and computes new orderings.
//! Every resulting change goes through [`StateManager::dispatch`].

use serde::{Deserialize, Serialize};
use serde_json::Map;
use tracing::{debug, warn};

use mediakit_common::IdGenerator;

use crate::actions::Action;
use crate::commands;
use crate::model::{LayoutState, Section};
use crate::store::StateManager;

/// Where a dragged component lands relative to the hovered one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
}

/// Vertical extent of a hovered component's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBounds {
    pub top: f64,
    pub height: f64,
}

impl DropPosition {
    /// Upper half means before, lower half (midpoint included) means after
    pub fn from_cursor(bounds: TargetBounds, cursor_y: f64) -> Self {
        let midpoint = bounds.top + bounds.height / 2.0;
        if cursor_y < midpoint {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    pub component_id: String,
    pub position: DropPosition,
}

/// What travels with a drag (the page's DataTransfer entries)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// `application/x-component-type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    /// `application/x-component-id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    /// `text/plain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DragPayload {
    pub fn library(component_type: &str) -> Self {
        Self {
            component_type: Some(component_type.to_string()),
            component_id: None,
            text: Some(component_type.to_string()),
        }
    }

    pub fn reorder(component_id: &str) -> Self {
        Self {
            component_type: None,
            component_id: Some(component_id.to_string()),
            text: None,
        }
    }

    /// Component type of a library drop; plain text is the fallback
    pub fn library_type(&self) -> Option<&str> {
        self.component_type.as_deref().or(self.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LibraryDragState {
    #[default]
    Idle,
    Dragging {
        component_type: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReorderState {
    #[default]
    Idle,
    Dragging {
        component_id: String,
        last_target: Option<DropTarget>,
    },
}

#[derive(Debug, Default)]
pub struct DragDropCoordinator {
    library: LibraryDragState,
    reorder: ReorderState,
}

impl DragDropCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn library_state(&self) -> &LibraryDragState {
        &self.library
    }

    pub fn reorder_state(&self) -> &ReorderState {
        &self.reorder
    }

    /// Pointer down on a library item; returns what the page should attach to the drag
    pub fn begin_library_drag(&mut self, component_type: &str) -> DragPayload {
        debug!(component_type, "Library drag started");
        self.library = LibraryDragState::Dragging {
            component_type: component_type.to_string(),
        };
        DragPayload::library(component_type)
    }

    /// Drag ended without a drop
    pub fn end_library_drag(&mut self) {
        self.library = LibraryDragState::Idle;
    }

    /// Drop on the preview or a section drop zone; returns the new component id
    ///
    /// The payload must match the type recorded when the drag began, anything
    /// else (a file, text from another window) is ignored.
    pub fn drop_from_library(
        &mut self,
        payload: &DragPayload,
        target_section: Option<&str>,
        store: &mut StateManager,
        ids: &dyn IdGenerator,
    ) -> Option<String> {
        let expected = match std::mem::take(&mut self.library) {
            LibraryDragState::Dragging { component_type } => component_type,
            LibraryDragState::Idle => {
                debug!("Drop without an active library drag");
                return None;
            }
        };

        match payload.library_type() {
            Some(dropped) if dropped == expected => {}
            other => {
                warn!(expected = %expected, dropped = ?other, "Ignoring foreign drop payload");
                return None;
            }
        }

        commands::add_component(store, ids, &expected, Map::new(), target_section)
    }

    /// Pointer down on a drag handle inside the preview
    pub fn begin_reorder(&mut self, component_id: &str) -> DragPayload {
        debug!(component_id, "Reorder drag started");
        self.reorder = ReorderState::Dragging {
            component_id: component_id.to_string(),
            last_target: None,
        };
        DragPayload::reorder(component_id)
    }

    /// Hovering another component; returns the indicator position to show
    pub fn drag_over(
        &mut self,
        target_component_id: &str,
        bounds: TargetBounds,
        cursor_y: f64,
    ) -> Option<DropPosition> {
        let ReorderState::Dragging {
            component_id,
            last_target,
        } = &mut self.reorder
        else {
            return None;
        };

        // The dragged component is never its own target
        if component_id.as_str() == target_component_id {
            return None;
        }

        let position = DropPosition::from_cursor(bounds, cursor_y);
        *last_target = Some(DropTarget {
            component_id: target_component_id.to_string(),
            position,
        });
        Some(position)
    }

    /// Drop on the last valid target. Returns `true` if the order changed.
    pub fn drop_reorder(&mut self, payload: &DragPayload, store: &mut StateManager) -> bool {
        let (dragged, target) = match std::mem::take(&mut self.reorder) {
            ReorderState::Dragging {
                component_id,
                last_target,
            } => (component_id, last_target),
            ReorderState::Idle => return false,
        };

        if payload.component_id.as_deref() != Some(dragged.as_str()) {
            warn!(dragged = %dragged, "Reorder payload does not match the dragged component");
            return false;
        }

        let Some(target) = target else {
            debug!(dragged = %dragged, "Reorder dropped without a target");
            return false;
        };

        match move_component(store.state(), &dragged, &target.component_id, target.position) {
            Some(sections) => store.dispatch(Action::UpdateSections(sections)),
            None => false,
        }
    }

    /// Drop on a section container rather than on a component: move to its end
    pub fn drop_on_container(
        &mut self,
        payload: &DragPayload,
        section_id: &str,
        store: &mut StateManager,
    ) -> bool {
        let dragged = match std::mem::take(&mut self.reorder) {
            ReorderState::Dragging { component_id, .. } => component_id,
            ReorderState::Idle => return false,
        };

        if payload.component_id.as_deref() != Some(dragged.as_str()) {
            return false;
        }

        match move_to_end(store.state(), &dragged, section_id) {
            Some(sections) => store.dispatch(Action::UpdateSections(sections)),
            None => false,
        }
    }

    /// Drag left the preview or was aborted
    pub fn cancel_reorder(&mut self) {
        self.reorder = ReorderState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        self.library != LibraryDragState::Idle || self.reorder != ReorderState::Idle
    }
}

/// New ordering for `ids` with `dragged` placed before/after `target`
///
/// `None` if either id is missing or they are the same component.
pub fn reorder_ids(
    ids: &[String],
    dragged: &str,
    target: &str,
    position: DropPosition,
) -> Option<Vec<String>> {
    if dragged == target {
        return None;
    }
    let from = ids.iter().position(|id| id == dragged)?;
    ids.iter().position(|id| id == target)?;

    let mut next = ids.to_vec();
    let moved = next.remove(from);
    let target_index = next.iter().position(|id| id == target)?;
    let insert_at = match position {
        DropPosition::Before => target_index,
        DropPosition::After => target_index + 1,
    };
    next.insert(insert_at, moved);
    Some(next)
}

/// Sections after moving `dragged` next to `target`, possibly into another section
///
/// `None` when nothing would change.
pub fn move_component(
    state: &LayoutState,
    dragged: &str,
    target: &str,
    position: DropPosition,
) -> Option<Vec<Section>> {
    let (from_section, _) = state.locate(dragged)?;
    let (to_section, _) = state.locate(target)?;

    let mut sections = state.sections.clone();

    if from_section == to_section {
        let ids = &sections[from_section].components;
        let next = reorder_ids(ids, dragged, target, position)?;
        if &next == ids {
            return None;
        }
        sections[from_section].components = next;
        return Some(sections);
    }

    sections[from_section].components.retain(|id| id != dragged);
    let dest = &mut sections[to_section].components;
    let target_index = dest.iter().position(|id| id == target)?;
    let insert_at = match position {
        DropPosition::Before => target_index,
        DropPosition::After => target_index + 1,
    };
    dest.insert(insert_at, dragged.to_string());
    Some(sections)
}

/// Sections after moving `dragged` to the end of `section_id`
pub fn move_to_end(state: &LayoutState, dragged: &str, section_id: &str) -> Option<Vec<Section>> {
    let (from_section, from_index) = state.locate(dragged)?;
    let to_section = state.section_index(section_id)?;

    if from_section == to_section && from_index + 1 == state.sections[to_section].components.len() {
        return None;
    }

    let mut sections = state.sections.clone();
    sections[from_section].components.retain(|id| id != dragged);
    sections[to_section].components.push(dragged.to_string());
    Some(sections)
}
