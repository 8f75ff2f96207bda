//! # Media Kit Editor
//!
//! Document state and editing engine for the media kit builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ page / cli / wasm: user gestures            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: LayoutState + actions               │
//! │  - Validate and apply actions               │
//! │  - Notify subscribers                       │
//! │  - Snapshot undo/redo                       │
//! │  - Drag/drop and toolbar commands           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: LayoutState → VDOM / HTML         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **State is source of truth**: VDOM, HTML and saved JSON are derived views
//! 2. **Actions are the only writers**: nothing else mutates a `LayoutState` in place
//! 3. **Integrity is enforced on write**: sections never reference missing components
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mediakit_editor::{Action, Component, LayoutState, Section, SectionType, StateManager};
//!
//! let mut store = StateManager::new(LayoutState::new());
//! store.subscribe(|state| println!("{} components", state.components.len()));
//!
//! store.dispatch(Action::AddSection(Section::new("s1", SectionType::FullWidth)));
//! store.dispatch(Action::AddComponent(Component::new("c1", "hero", "s1")));
//!
//! store.undo();
//! ```

mod actions;
pub mod commands;
pub mod drag;
mod errors;
mod model;
mod store;
mod undo_stack;

pub use actions::{Action, ActionError, ComponentUpdate, StatePatch, ACTION_TYPES};
pub use commands::{CommandOutcome, ComponentCommand, SectionCommand};
pub use drag::{
    DragDropCoordinator, DragPayload, DropPosition, DropTarget, LibraryDragState, ReorderState,
    TargetBounds,
};
pub use errors::EditorError;
pub use model::{
    Component, ComponentData, ComponentMap, LayoutState, RepairReport, Section, SectionType,
    DEFAULT_THEME,
};
pub use store::{StateManager, SubscriptionId};
pub use undo_stack::{HistoryEntry, UndoStack};
