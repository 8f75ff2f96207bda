//! LayoutState → VirtualDomDocument
//!
//! Rendering never fails. A component whose type is not registered, or whose
//! renderer returns an error, is drawn as a fallback box naming its type and
//! id so the rest of the page still shows up.

use tracing::{debug, warn};

use mediakit_editor::{
    Component, ComponentCommand, LayoutState, Section, SectionCommand, DEFAULT_THEME,
};

use crate::registry::ComponentRegistry;
use crate::theme::{resolve_theme, theme_rule};
use crate::vdom::{VNode, VirtualDomDocument};

pub const PREVIEW_ID: &str = "media-kit-preview";

/// Options for rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit control bars, drag handles and drop zones
    pub editable: bool,
    /// Attach the theme's `:root` variables as a document style rule
    pub theme_styles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            editable: true,
            theme_styles: true,
        }
    }
}

impl RenderOptions {
    /// Static output: no editor chrome
    pub fn export() -> Self {
        Self {
            editable: false,
            theme_styles: true,
        }
    }
}

pub struct Renderer {
    registry: ComponentRegistry,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self::with_options(registry, RenderOptions::default())
    }

    pub fn with_options(registry: ComponentRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Render the whole layout
    pub fn render(&self, state: &LayoutState) -> VirtualDomDocument {
        self.render_with_options(state, &self.options)
    }

    /// Render with this registry but different options (export, read-only preview)
    pub fn render_with_options(&self, state: &LayoutState, options: &RenderOptions) -> VirtualDomDocument {
        self.pass(options).render(state)
    }

    pub fn render_section(&self, section: &Section, state: &LayoutState) -> VNode {
        self.pass(&self.options).render_section(section, state)
    }

    /// Wrapper, control bar and registered body for one component
    pub fn render_component(&self, component: &Component) -> VNode {
        self.pass(&self.options).render_component(component)
    }

    fn pass<'a>(&'a self, options: &'a RenderOptions) -> RenderPass<'a> {
        RenderPass {
            registry: &self.registry,
            options,
        }
    }
}

/// One render over a borrowed registry
struct RenderPass<'a> {
    registry: &'a ComponentRegistry,
    options: &'a RenderOptions,
}

impl RenderPass<'_> {
    fn render(&self, state: &LayoutState) -> VirtualDomDocument {
        let theme_id = if state.theme.is_empty() {
            DEFAULT_THEME
        } else {
            state.theme.as_str()
        };

        let mut preview = VNode::element("div")
            .with_attr("id", PREVIEW_ID)
            .with_attr("class", format!("preview-area theme-{}", theme_id))
            .with_key(PREVIEW_ID);

        if state.components.is_empty() && state.sections.is_empty() {
            preview = preview.with_child(self.render_empty_state());
        } else if !state.sections.is_empty() {
            preview = preview.with_children(
                state
                    .sections
                    .iter()
                    .map(|section| self.render_section(section, state)),
            );
        } else {
            preview = preview.with_children(
                state
                    .components
                    .values()
                    .map(|component| self.render_component(component)),
            );
        }

        let mut doc = VirtualDomDocument::new();
        doc.add_node(preview);
        if self.options.theme_styles {
            doc.styles.push(theme_rule(resolve_theme(theme_id)));
        }

        debug!(
            sections = state.sections.len(),
            components = state.components.len(),
            theme = theme_id,
            "Rendered layout"
        );
        doc
    }

    fn render_empty_state(&self) -> VNode {
        let mut node = VNode::div("gmkb-empty-state")
            .with_child(VNode::element("h3").with_text("No components yet"))
            .with_child(VNode::element("p").with_text("Click \"Add Component\" to get started"));

        if self.options.editable {
            node = node.with_child(
                VNode::element("button")
                    .with_attr("id", "empty-state-add-btn")
                    .with_attr("class", "btn btn-primary")
                    .with_text("Add Component"),
            );
        }
        node
    }

    fn render_section(&self, section: &Section, state: &LayoutState) -> VNode {
        let mut node = VNode::div(format!(
            "gmkb-section gmkb-section--{}",
            section.section_type
        ))
        .with_attr("data-section-id", &section.section_id)
        .with_key(&section.section_id);

        if self.options.editable {
            node = node.with_child(section_controls());
        }

        let mut content = VNode::div("gmkb-section__content");
        if section.components.is_empty() {
            if self.options.editable {
                content = content.with_child(
                    VNode::div("gmkb-section__empty")
                        .with_attr("data-drop-zone", "true")
                        .with_child(VNode::element("p").with_text("Drop components here")),
                );
            }
        } else {
            for id in &section.components {
                match state.component(id) {
                    Some(component) => content = content.with_child(self.render_component(component)),
                    None => warn!(section_id = %section.section_id, component_id = %id, "Section references a missing component"),
                }
            }
        }

        node.with_child(content)
    }

    fn render_component(&self, component: &Component) -> VNode {
        let Some(render) = self.registry.get(&component.component_type) else {
            warn!(component_type = %component.component_type, "No renderer for component type");
            return self.render_fallback(component);
        };

        let body = match render(component) {
            Ok(body) => body,
            Err(e) => {
                warn!(component_id = %component.id, error = %e, "Component renderer failed");
                return self.render_fallback(component);
            }
        };

        let mut node = self.component_wrapper(component, "");
        if self.options.editable {
            node = node.with_child(component_controls());
        }
        node.with_child(body)
    }

    fn render_fallback(&self, component: &Component) -> VNode {
        let mut node = self
            .component_wrapper(component, " gmkb-component--fallback")
            .with_child(
                VNode::div("component-fallback")
                    .with_child(VNode::element("h4").with_text(&component.component_type))
                    .with_child(
                        VNode::element("p").with_text(format!("Component ID: {}", component.id)),
                    ),
            );
        if self.options.editable {
            node = node.with_child(component_controls());
        }
        node
    }

    fn component_wrapper(&self, component: &Component, extra_class: &str) -> VNode {
        let mut node = VNode::div(format!(
            "gmkb-component gmkb-component--{}{}",
            component.component_type, extra_class
        ))
        .with_attr("data-component-id", &component.id)
        .with_attr("data-component-type", &component.component_type)
        .with_key(&component.id);

        if self.options.editable {
            node = node.with_attr("draggable", "true");
        }
        node
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ComponentRegistry::with_builtins())
    }
}

fn control_button(class: &str, action: &str, title: &str, glyph: &str) -> VNode {
    VNode::element("button")
        .with_attr("class", format!("control-btn {}", class))
        .with_attr("data-action", action)
        .with_attr("title", title)
        .with_text(glyph)
}

fn component_controls() -> VNode {
    VNode::div("component-controls").with_children(ComponentCommand::ALL.iter().map(|command| {
        let glyph = match command {
            ComponentCommand::MoveUp => "↑",
            ComponentCommand::MoveDown => "↓",
            ComponentCommand::Edit => "✏️",
            ComponentCommand::Duplicate => "📋",
            ComponentCommand::Delete => "🗑️",
        };
        control_button(command.as_str(), command.as_str(), command.title(), glyph)
    }))
}

fn section_controls() -> VNode {
    VNode::div("section-controls")
        .with_child(control_button(
            "delete",
            SectionCommand::Delete.as_str(),
            SectionCommand::Delete.title(),
            "🗑️",
        ))
        .with_child(control_button(
            "settings",
            SectionCommand::Settings.as_str(),
            SectionCommand::Settings.title(),
            "⚙️",
        ))
}
