/// Tests for the layout renderer
///
/// These cover the DOM contract the page scripts rely on (classes, data
/// attributes, control bars) and the fallback paths that keep a broken
/// component from taking the preview down.
use crate::errors::RenderError;
use crate::registry::ComponentRegistry;
use crate::renderer::{RenderOptions, Renderer, PREVIEW_ID};
use crate::vdom::VNode;
use mediakit_editor::{Action, Component, LayoutState, Section, SectionType, StateManager};
use serde_json::json;

fn layout() -> LayoutState {
    let mut store = StateManager::default();
    store.dispatch(Action::AddSection(Section::new("s1", SectionType::TwoColumn)));
    store.dispatch(Action::AddSection(Section::new("s2", SectionType::FullWidth)));
    store.dispatch(Action::AddComponent(
        Component::new("hero_1", "hero", "s1").with_field("title", "Jane Doe"),
    ));
    store.dispatch(Action::AddComponent(Component::new("bio_1", "biography", "s1")));
    store.snapshot()
}

fn preview(state: &LayoutState, renderer: &Renderer) -> VNode {
    let doc = renderer.render(state);
    assert_eq!(doc.nodes.len(), 1);
    doc.nodes[0].clone()
}

#[test]
fn test_preview_root_carries_theme() {
    let mut state = layout();
    state.theme = "modern_dark".into();

    let root = preview(&state, &Renderer::default());
    assert_eq!(root.attr("id"), Some(PREVIEW_ID));
    assert_eq!(root.attr("class"), Some("preview-area theme-modern_dark"));
}

#[test]
fn test_sections_in_order_with_content() {
    let root = preview(&layout(), &Renderer::default());
    let sections = root.children();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].attr("data-section-id"), Some("s1"));
    assert!(sections[0].has_class("gmkb-section--two_column"));
    assert_eq!(sections[0].key(), Some("s1"));

    let content = sections[0]
        .find(&|n| n.has_class("gmkb-section__content"))
        .unwrap();
    let ids: Vec<_> = content
        .children()
        .iter()
        .map(|c| c.attr("data-component-id").unwrap())
        .collect();
    assert_eq!(ids, vec!["hero_1", "bio_1"]);
}

#[test]
fn test_empty_section_is_a_drop_zone() {
    let root = preview(&layout(), &Renderer::default());
    let zone = root.children()[1]
        .find(&|n| n.has_class("gmkb-section__empty"))
        .unwrap();

    assert_eq!(zone.attr("data-drop-zone"), Some("true"));
    assert_eq!(zone.text_content(), "Drop components here");
}

#[test]
fn test_component_wrapper_contract() {
    let root = preview(&layout(), &Renderer::default());
    let hero = root.find(&|n| n.attr("data-component-id") == Some("hero_1")).unwrap();

    assert_eq!(hero.attr("class"), Some("gmkb-component gmkb-component--hero"));
    assert_eq!(hero.attr("data-component-type"), Some("hero"));
    assert_eq!(hero.attr("draggable"), Some("true"));
    assert_eq!(hero.key(), Some("hero_1"));

    let controls = hero.find(&|n| n.has_class("component-controls")).unwrap();
    let actions: Vec<_> = controls
        .children()
        .iter()
        .map(|b| b.attr("data-action").unwrap())
        .collect();
    assert_eq!(actions, vec!["move-up", "move-down", "edit", "duplicate", "delete"]);

    assert!(hero.text_content().contains("Jane Doe"));
}

#[test]
fn test_section_controls() {
    let root = preview(&layout(), &Renderer::default());
    let controls = root.children()[0]
        .find(&|n| n.has_class("section-controls"))
        .unwrap();
    let actions: Vec<_> = controls
        .children()
        .iter()
        .map(|b| b.attr("data-action").unwrap())
        .collect();
    assert_eq!(actions, vec!["delete-section", "section-settings"]);
}

#[test]
fn test_unknown_type_renders_fallback() {
    let mut state = layout();
    state.components.insert("x_1".into(), Component::new("x_1", "podcast-player", "s2"));
    state.sections[1].components.push("x_1".into());

    let root = preview(&state, &Renderer::default());
    let node = root.find(&|n| n.attr("data-component-id") == Some("x_1")).unwrap();

    assert!(node.has_class("gmkb-component--fallback"));
    assert!(node.has_class("gmkb-component--podcast-player"));
    let text = node.find(&|n| n.has_class("component-fallback")).unwrap().text_content();
    assert_eq!(text, "podcast-playerComponent ID: x_1");
}

#[test]
fn test_failing_renderer_renders_fallback() {
    let mut registry = ComponentRegistry::with_builtins();
    registry.register("hero", |c| {
        Err(RenderError::ComponentFailed {
            component_type: c.component_type.clone(),
            message: "template missing".into(),
        })
    });

    let root = preview(&layout(), &Renderer::new(registry));
    let hero = root.find(&|n| n.attr("data-component-id") == Some("hero_1")).unwrap();
    assert!(hero.has_class("gmkb-component--fallback"));

    // The neighbour still renders normally
    let bio = root.find(&|n| n.attr("data-component-id") == Some("bio_1")).unwrap();
    assert!(!bio.has_class("gmkb-component--fallback"));
}

#[test]
fn test_bad_data_renders_fallback() {
    let mut state = layout();
    state.components.insert(
        "t_1".into(),
        Component::new("t_1", "topics", "s2").with_field("topics", json!(42)),
    );
    state.sections[1].components.push("t_1".into());

    let root = preview(&state, &Renderer::default());
    let node = root.find(&|n| n.attr("data-component-id") == Some("t_1")).unwrap();
    assert!(node.has_class("gmkb-component--fallback"));
}

#[test]
fn test_empty_layout_renders_empty_state() {
    let root = preview(&LayoutState::default(), &Renderer::default());
    assert_eq!(root.children().len(), 1);
    assert!(root.children()[0].has_class("gmkb-empty-state"));
}

#[test]
fn test_components_without_sections_render_in_map_order() {
    let mut state = LayoutState::default();
    for id in ["c", "a", "b"] {
        state.components.insert(id.into(), Component::new(id, "cta", ""));
    }

    let root = preview(&state, &Renderer::default());
    let ids: Vec<_> = root
        .children()
        .iter()
        .map(|c| c.attr("data-component-id").unwrap())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_export_mode_has_no_editor_chrome() {
    let renderer = Renderer::with_options(ComponentRegistry::with_builtins(), RenderOptions::export());
    let doc = renderer.render(&layout());

    assert!(doc.find(&|n| n.has_class("component-controls")).is_none());
    assert!(doc.find(&|n| n.has_class("section-controls")).is_none());
    assert!(doc.find(&|n| n.has_class("gmkb-section__empty")).is_none());
    assert!(doc.find(&|n| n.attr("draggable").is_some()).is_none());
}

#[test]
fn test_theme_rule_attached() {
    let doc = Renderer::default().render(&layout());
    assert_eq!(doc.styles.len(), 1);
    assert_eq!(doc.styles[0].selector, ":root");
    assert_eq!(doc.styles[0].properties["--gmkb-color-primary"], "#295cff");
}

#[test]
fn test_unknown_theme_uses_default_variables() {
    let mut state = layout();
    state.theme = "vaporwave".into();

    let doc = Renderer::default().render(&state);
    assert_eq!(doc.nodes[0].attr("class"), Some("preview-area theme-vaporwave"));
    assert_eq!(doc.styles[0].properties["--gmkb-color-primary"], "#295cff");
}

#[test]
fn test_export_html_escapes_content() {
    let mut state = layout();
    state.components["hero_1"].data.insert("title".into(), json!("<script>alert(1)</script>"));

    let html = crate::export_html(&state, &Renderer::default());
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("--gmkb-font-primary"));
}
