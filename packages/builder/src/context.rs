//! One builder page: state, renderer, drag/drop, persistence and toasts.
//!
//! Toolbar and library handlers go through [`BuilderContext`] rather than
//! the individual parts, so user-facing feedback (toasts) and logging stay
//! in one place.

use tracing::{debug, error, info, warn};

use mediakit_api::{ApiError, ApiService, AutoSaver, SaveReceipt};
use mediakit_common::{IdGenerator, Notifier, TimestampIdGenerator, Toast, TracingNotifier};
use mediakit_editor::{
    commands, Action, CommandOutcome, ComponentCommand, ComponentData, DragDropCoordinator,
    DragPayload, DropPosition, LayoutState, SectionCommand, SectionType, StateManager,
    SubscriptionId, TargetBounds,
};
use mediakit_renderer::theme::find_theme;
use mediakit_renderer::{
    export_html, render_fragment, ComponentInfo, ComponentRegistry, HtmlOptions, RenderOptions,
    Renderer, VirtualDomDocument,
};

use crate::config::BuilderConfig;
use crate::error::BuilderResult;

pub struct BuilderContext {
    config: BuilderConfig,
    store: StateManager,
    renderer: Renderer,
    drag: DragDropCoordinator,
    api: ApiService,
    notifier: Box<dyn Notifier>,
    ids: Box<dyn IdGenerator>,
    autosave: Option<(AutoSaver, SubscriptionId)>,
    initialized: bool,
}

impl BuilderContext {
    /// Context with wall-clock ids and toasts written to the log
    pub fn new(config: BuilderConfig) -> BuilderResult<Self> {
        Self::with_parts(config, Box::new(TracingNotifier), Box::new(TimestampIdGenerator))
    }

    pub fn with_parts(
        config: BuilderConfig,
        notifier: Box<dyn Notifier>,
        ids: Box<dyn IdGenerator>,
    ) -> BuilderResult<Self> {
        let api = ApiService::new(config.api_config())?;
        let initial = LayoutState {
            theme: config.default_theme.clone(),
            ..LayoutState::default()
        };

        Ok(Self {
            store: StateManager::with_history_limit(initial, config.max_undo_levels),
            renderer: Renderer::new(ComponentRegistry::with_builtins()),
            drag: DragDropCoordinator::new(),
            api,
            notifier,
            ids,
            autosave: None,
            initialized: false,
            config,
        })
    }

    /// Adopt the saved layout (if any) and start auto-saving
    ///
    /// Auto-save only starts when an endpoint is configured and a tokio
    /// runtime is running.
    pub fn init(&mut self, saved: Option<LayoutState>) {
        if self.initialized {
            self.teardown();
        }

        let state = match saved {
            Some(state) => self.prepare_loaded(state),
            None => self.store.snapshot(),
        };
        self.store.reset(state);

        if self.config.autosave && self.api.is_configured() {
            if tokio::runtime::Handle::try_current().is_ok() {
                let saver = AutoSaver::spawn(self.api.clone(), self.config.autosave_delay());
                let tx = saver.sender();
                let subscription = self.store.subscribe(move |state| {
                    let _ = tx.send(state.clone());
                });
                self.autosave = Some((saver, subscription));
            } else {
                warn!("No async runtime, auto-save disabled");
            }
        }

        self.initialized = true;
        info!(
            components = self.store.state().components.len(),
            sections = self.store.state().sections.len(),
            autosave = self.autosave.is_some(),
            "Media Kit Builder initialized"
        );
    }

    /// Stop auto-saving and drop any drag in progress
    pub fn teardown(&mut self) {
        if let Some((saver, subscription)) = self.autosave.take() {
            self.store.unsubscribe(subscription);
            saver.stop();
        }
        self.drag.end_library_drag();
        self.drag.cancel_reorder();
        self.initialized = false;
        debug!("Builder torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn state(&self) -> &LayoutState {
        self.store.state()
    }

    pub fn store(&self) -> &StateManager {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateManager {
        &mut self.store
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn drag(&self) -> &DragDropCoordinator {
        &self.drag
    }

    pub fn is_autosaving(&self) -> bool {
        self.autosave.is_some()
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.store.dispatch(action)
    }

    /// Entries for the "Add Component" list
    pub fn library(&self) -> Vec<ComponentInfo> {
        self.renderer.registry().library().cloned().collect()
    }

    // Toolbar ------------------------------------------------------------

    /// Add a component to the first section, creating one if needed
    pub fn add_component(&mut self, component_type: &str, data: ComponentData) -> Option<String> {
        let id = commands::add_component(&mut self.store, self.ids.as_ref(), component_type, data, None);
        if id.is_some() {
            self.notify(Toast::success(format!("Added {} component", component_type)));
        }
        id
    }

    pub fn add_section(&mut self, section_type: SectionType) -> Option<String> {
        commands::add_section(&mut self.store, self.ids.as_ref(), section_type)
    }

    pub fn component_command(&mut self, command: ComponentCommand, component_id: &str) -> CommandOutcome {
        commands::handle_component_command(&mut self.store, self.ids.as_ref(), command, component_id)
    }

    pub fn section_command(&mut self, command: SectionCommand, section_id: &str) -> CommandOutcome {
        commands::handle_section_command(&mut self.store, command, section_id)
    }

    /// Switch to one of the builtin themes
    pub fn set_theme(&mut self, theme_id: &str) -> bool {
        let Some(theme) = find_theme(theme_id) else {
            warn!(theme = theme_id, "Unknown theme");
            self.notify(Toast::warning(format!("Unknown theme: {}", theme_id)));
            return false;
        };

        let applied = self.store.dispatch(Action::SetTheme(theme_id.to_string()));
        if applied {
            self.notify(Toast::success(format!("Theme changed to {}", theme.theme_name)));
        }
        applied
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    // Drag and drop ------------------------------------------------------

    pub fn begin_library_drag(&mut self, component_type: &str) -> DragPayload {
        self.drag.begin_library_drag(component_type)
    }

    pub fn drop_from_library(&mut self, payload: &DragPayload, target_section: Option<&str>) -> Option<String> {
        let id = self
            .drag
            .drop_from_library(payload, target_section, &mut self.store, self.ids.as_ref());
        if let (Some(_), Some(component_type)) = (&id, payload.library_type()) {
            self.notify(Toast::success(format!("Added {} component", component_type)));
        }
        id
    }

    pub fn begin_reorder(&mut self, component_id: &str) -> DragPayload {
        self.drag.begin_reorder(component_id)
    }

    pub fn drag_over(&mut self, target_component_id: &str, bounds: TargetBounds, cursor_y: f64) -> Option<DropPosition> {
        self.drag.drag_over(target_component_id, bounds, cursor_y)
    }

    pub fn drop_reorder(&mut self, payload: &DragPayload) -> bool {
        self.drag.drop_reorder(payload, &mut self.store)
    }

    pub fn drop_on_container(&mut self, payload: &DragPayload, section_id: &str) -> bool {
        self.drag.drop_on_container(payload, section_id, &mut self.store)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.end_library_drag();
        self.drag.cancel_reorder();
    }

    // Rendering ----------------------------------------------------------

    pub fn render(&self) -> VirtualDomDocument {
        self.renderer.render(self.store.state())
    }

    /// Preview markup for the page container
    pub fn render_html(&self) -> String {
        render_fragment(&self.render().nodes, &HtmlOptions::default())
    }

    /// Standalone themed page without editor chrome
    pub fn export_html(&self) -> String {
        export_html(self.store.state(), &self.renderer)
    }

    pub fn export_json(&self) -> BuilderResult<String> {
        Ok(self.store.state().to_json_pretty()?)
    }

    pub fn set_render_options(&mut self, options: RenderOptions) {
        self.renderer.set_options(options);
    }

    // Persistence --------------------------------------------------------

    /// Manual save from the toolbar
    ///
    /// Success and failure are both reported as toasts; a failed save never
    /// touches the state.
    pub async fn save(&self) -> BuilderResult<SaveReceipt> {
        let snapshot = self.store.snapshot();
        match self.api.save(&snapshot).await {
            Ok(receipt) => {
                self.notify(Toast::success("Saved successfully"));
                Ok(receipt)
            }
            Err(e) => {
                error!(error = %e, "Save failed");
                self.notify(Toast::error(failure_message("Save failed", &e)));
                Err(e.into())
            }
        }
    }

    /// Replace the current layout with the stored one
    pub async fn load(&mut self) -> BuilderResult<()> {
        let loaded = match self.api.load().await {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(error = %e, "Load failed");
                self.notify(Toast::error(failure_message("Load failed", &e)));
                return Err(e.into());
            }
        };

        let state = self.prepare_loaded(loaded.state);
        self.store.reset(state);
        info!(media_kit_id = ?loaded.media_kit_id, "Layout loaded");
        Ok(())
    }

    /// Server-side data for one component
    pub async fn load_component(&self, component_id: &str) -> BuilderResult<serde_json::Value> {
        Ok(self.api.load_component(component_id).await?)
    }

    fn prepare_loaded(&self, mut state: LayoutState) -> LayoutState {
        if state.theme.is_empty() {
            state.theme = self.config.default_theme.clone();
        }

        let report = state.normalize_loaded(self.ids.as_ref());
        if !report.is_clean() {
            warn!(
                dangling = report.dangling.len(),
                duplicates = report.duplicates.len(),
                "Repaired loaded layout"
            );
        }

        if self.config.prune_orphans_on_load {
            let pruned = state.prune_orphans();
            if !pruned.is_empty() {
                info!(count = pruned.len(), "Pruned orphaned components");
            }
        } else {
            let orphans = state.orphaned_components();
            if !orphans.is_empty() {
                debug!(count = orphans.len(), "Keeping orphaned components");
            }
        }
        state
    }

    fn notify(&self, toast: Toast) {
        self.notifier.notify(toast);
    }
}

/// Toast text for a failed request, carrying the server's reason
fn failure_message(prefix: &str, e: &ApiError) -> String {
    let detail = e.to_string();
    if detail.starts_with(prefix) {
        detail
    } else {
        format!("{}: {}", prefix, detail)
    }
}

impl Drop for BuilderContext {
    fn drop(&mut self) {
        if self.initialized {
            self.teardown();
        }
    }
}
