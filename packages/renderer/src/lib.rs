pub mod builtins;
pub mod errors;
pub mod html;
pub mod registry;
pub mod renderer;
pub mod theme;
pub mod vdom;
pub mod vdom_differ;

#[cfg(test)]
mod tests_renderer;

#[cfg(test)]
mod tests_patches;

pub use errors::{RenderError, RenderResult};
pub use html::{escape_html, render_document, render_fragment, HtmlOptions};
pub use registry::{ComponentInfo, ComponentRegistry, RenderFn};
pub use renderer::{RenderOptions, Renderer, PREVIEW_ID};
pub use theme::{generate_theme_css, resolve_theme, Theme, DEFAULT_THEME_ID, THEMES};
pub use vdom::{Attributes, CssRule, VNode, VirtualDomDocument};
pub use vdom_differ::{apply_patches, diff_vdocument, NodePath, VDocPatch};

use mediakit_editor::LayoutState;

/// Standalone themed HTML page for a layout, without editor chrome
///
/// Uses the renderer's registry so custom component types export the same
/// way they preview.
pub fn export_html(state: &LayoutState, renderer: &Renderer) -> String {
    let doc = renderer.render_with_options(state, &RenderOptions::export());
    render_document(&doc, &HtmlOptions::default())
}
