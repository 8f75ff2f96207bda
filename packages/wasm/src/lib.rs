use wasm_bindgen::prelude::*;

use mediakit_common::TimestampIdGenerator;
use mediakit_editor::{
    commands, ComponentCommand, ComponentData, DragDropCoordinator, DragPayload, DropPosition,
    LayoutState, SectionCommand, SectionType, StateManager, TargetBounds,
};
use mediakit_renderer::{
    diff_vdocument, export_html, generate_theme_css, render_fragment, resolve_theme,
    ComponentRegistry, HtmlOptions, Renderer, VirtualDomDocument,
};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Editor engine for one builder page
///
/// The page forwards gestures here and applies the returned patches to the
/// `#media-kit-preview` container.
#[wasm_bindgen]
pub struct MediaKitEditor {
    store: StateManager,
    renderer: Renderer,
    drag: DragDropCoordinator,
    ids: TimestampIdGenerator,
    rendered: VirtualDomDocument,
}

#[wasm_bindgen]
impl MediaKitEditor {
    /// Start from saved layout JSON, or an empty layout
    #[wasm_bindgen(constructor)]
    pub fn new(saved_state: Option<String>) -> Result<MediaKitEditor, JsValue> {
        let ids = TimestampIdGenerator;
        let mut state = match saved_state.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                LayoutState::from_json(json).map_err(|e| js_error("Invalid saved state", e))?
            }
            _ => LayoutState::default(),
        };
        state.normalize_loaded(&ids);

        let renderer = Renderer::new(ComponentRegistry::with_builtins());
        let rendered = renderer.render(&state);
        Ok(MediaKitEditor {
            store: StateManager::new(state),
            renderer,
            drag: DragDropCoordinator::new(),
            ids,
            rendered,
        })
    }

    /// Apply a `{ "type": ..., "payload": ... }` action; unknown or invalid ones are ignored
    pub fn dispatch(&mut self, action_json: &str) -> bool {
        self.store.dispatch_json(action_json)
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.store
            .state()
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }

    /// Bumped on every applied change; cheap dirty check for the page
    pub fn version(&self) -> f64 {
        self.store.version() as f64
    }

    /// Full preview markup, and the baseline for the next `update`
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&mut self) -> String {
        self.rendered = self.renderer.render(self.store.state());
        render_fragment(&self.rendered.nodes, &HtmlOptions::default())
    }

    /// Patches (JSON array) turning the last rendered preview into the current one
    pub fn update(&mut self) -> Result<String, JsValue> {
        let next = self.renderer.render(self.store.state());
        let patches = diff_vdocument(&self.rendered, &next);
        self.rendered = next;
        serde_json::to_string(&patches).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self) -> String {
        export_html(self.store.state(), &self.renderer)
    }

    /// `[{ type, name, description }]` for the component library modal
    #[wasm_bindgen(js_name = libraryJson)]
    pub fn library_json(&self) -> Result<String, JsValue> {
        let entries: Vec<_> = self.renderer.registry().library().collect();
        serde_json::to_string(&entries).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(&mut self, component_type: &str, data_json: Option<String>) -> Result<Option<String>, JsValue> {
        let data: ComponentData = match data_json.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(json).map_err(|e| js_error("Invalid component data", e))?
            }
            _ => ComponentData::new(),
        };
        Ok(commands::add_component(&mut self.store, &self.ids, component_type, data, None))
    }

    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(&mut self, section_type: &str) -> Option<String> {
        commands::add_section(&mut self.store, &self.ids, SectionType::from(section_type))
    }

    /// Run a control bar button (`data-action`); returns the outcome as JSON
    #[wasm_bindgen(js_name = componentAction)]
    pub fn component_action(&mut self, action: &str, component_id: &str) -> Result<String, JsValue> {
        let command: ComponentCommand = action.parse().map_err(|e| js_error("Unknown action", e))?;
        let outcome = commands::handle_component_command(&mut self.store, &self.ids, command, component_id);
        serde_json::to_string(&outcome).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = sectionAction)]
    pub fn section_action(&mut self, action: &str, section_id: &str) -> Result<String, JsValue> {
        let command: SectionCommand = action.parse().map_err(|e| js_error("Unknown action", e))?;
        let outcome = commands::handle_section_command(&mut self.store, command, section_id);
        serde_json::to_string(&outcome).map_err(|e| js_error("Serialization error", e))
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.store.history().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.store.history().can_redo()
    }

    // Drag and drop: payloads cross the boundary as JSON

    #[wasm_bindgen(js_name = beginLibraryDrag)]
    pub fn begin_library_drag(&mut self, component_type: &str) -> Result<String, JsValue> {
        let payload = self.drag.begin_library_drag(component_type);
        serde_json::to_string(&payload).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = dropFromLibrary)]
    pub fn drop_from_library(&mut self, payload_json: &str, section_id: Option<String>) -> Option<String> {
        let payload = parse_payload(payload_json);
        self.drag
            .drop_from_library(&payload, section_id.as_deref(), &mut self.store, &self.ids)
    }

    #[wasm_bindgen(js_name = beginReorder)]
    pub fn begin_reorder(&mut self, component_id: &str) -> Result<String, JsValue> {
        let payload = self.drag.begin_reorder(component_id);
        serde_json::to_string(&payload).map_err(|e| js_error("Serialization error", e))
    }

    /// `"before"` / `"after"` for the drop indicator, nothing when the target is invalid
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, target_component_id: &str, top: f64, height: f64, cursor_y: f64) -> Option<String> {
        self.drag
            .drag_over(target_component_id, TargetBounds { top, height }, cursor_y)
            .map(|position| match position {
                DropPosition::Before => "before".to_string(),
                DropPosition::After => "after".to_string(),
            })
    }

    #[wasm_bindgen(js_name = dropReorder)]
    pub fn drop_reorder(&mut self, payload_json: &str) -> bool {
        self.drag.drop_reorder(&parse_payload(payload_json), &mut self.store)
    }

    #[wasm_bindgen(js_name = dropOnContainer)]
    pub fn drop_on_container(&mut self, payload_json: &str, section_id: &str) -> bool {
        self.drag
            .drop_on_container(&parse_payload(payload_json), section_id, &mut self.store)
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) {
        self.drag.end_library_drag();
        self.drag.cancel_reorder();
    }
}

/// Foreign drops (files, text from other pages) become an empty payload
fn parse_payload(json: &str) -> DragPayload {
    serde_json::from_str(json).unwrap_or_default()
}

/// `:root { --gmkb-* }` block for a theme; unknown ids give the default theme
#[wasm_bindgen(js_name = themeCss)]
pub fn theme_css(theme_id: &str) -> String {
    generate_theme_css(resolve_theme(theme_id))
}
