//! Renderers for the component types every media kit ships with

use serde_json::Value;

use mediakit_editor::{Component, ComponentData};

use crate::errors::{RenderError, RenderResult};
use crate::vdom::VNode;

/// Non-empty string (or number) field
fn text_field(data: &ComponentData, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array field; absent or null is an empty list, anything else is an error
fn list_field<'a>(data: &'a ComponentData, key: &str) -> RenderResult<&'a [Value]> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(RenderError::InvalidField {
            field: key.to_string(),
            details: format!("expected a list, got {}", other),
        }),
    }
}

fn heading(level: u8, content: impl Into<String>) -> VNode {
    VNode::element(format!("h{}", level)).with_text(content)
}

fn paragraph(content: impl Into<String>) -> VNode {
    VNode::element("p").with_text(content)
}

pub fn hero(component: &Component) -> RenderResult<VNode> {
    let data = &component.data;
    let title = text_field(data, "title")
        .or_else(|| text_field(data, "full_name"))
        .unwrap_or_else(|| "Guest Name".to_string());

    let mut node = VNode::div("gmkb-hero").with_child(heading(1, title));
    if let Some(subtitle) = text_field(data, "subtitle") {
        node = node.with_child(heading(2, subtitle));
    }
    if let Some(description) = text_field(data, "description") {
        node = node.with_child(paragraph(description));
    }
    Ok(node)
}

pub fn biography(component: &Component) -> RenderResult<VNode> {
    let text = text_field(&component.data, "biography")
        .unwrap_or_else(|| "No biography available.".to_string());

    Ok(VNode::div("gmkb-biography")
        .with_child(heading(2, "Biography"))
        .with_child(paragraph(text)))
}

pub fn topics(component: &Component) -> RenderResult<VNode> {
    let items = list_field(&component.data, "topics")?;
    let node = VNode::div("gmkb-topics").with_child(heading(2, "Topics"));

    if items.is_empty() {
        return Ok(node.with_child(paragraph("No topics available.")));
    }

    let mut list = VNode::element("ul");
    for item in items {
        let label = match item {
            Value::String(s) => s.clone(),
            Value::Object(map) => match map.get("title").or_else(|| map.get("name")) {
                Some(Value::String(s)) => s.clone(),
                _ => {
                    return Err(RenderError::InvalidField {
                        field: "topics".to_string(),
                        details: "topic object without a title".to_string(),
                    })
                }
            },
            other => other.to_string(),
        };
        list = list.with_child(VNode::element("li").with_text(label));
    }
    Ok(node.with_child(list))
}

pub fn contact(component: &Component) -> RenderResult<VNode> {
    let data = &component.data;
    let mut node = VNode::div("gmkb-contact").with_child(heading(2, "Contact"));

    for (key, label) in [("email", "Email"), ("phone", "Phone"), ("website", "Website")] {
        if let Some(value) = text_field(data, key) {
            node = node.with_child(paragraph(format!("{}: {}", label, value)));
        }
    }
    Ok(node)
}

pub fn cta(component: &Component) -> RenderResult<VNode> {
    let data = &component.data;
    let title = text_field(data, "title").unwrap_or_else(|| "Call to Action".to_string());

    let mut node = VNode::div("gmkb-cta").with_child(heading(2, title));
    if let Some(description) = text_field(data, "description") {
        node = node.with_child(paragraph(description));
    }
    if let Some(button) = text_field(data, "button_text") {
        let mut btn = VNode::element("button").with_attr("class", "btn btn-primary");
        if let Some(url) = text_field(data, "button_url") {
            btn = btn.with_attr("data-href", url);
        }
        node = node.with_child(btn.with_text(button));
    }
    Ok(node)
}

pub fn testimonials(component: &Component) -> RenderResult<VNode> {
    let items = list_field(&component.data, "testimonials")?;
    let mut node = VNode::div("gmkb-testimonials").with_child(heading(2, "Testimonials"));

    if items.is_empty() {
        return Ok(node.with_child(paragraph("No testimonials available.")));
    }

    for item in items {
        let Value::Object(entry) = item else {
            return Err(RenderError::InvalidField {
                field: "testimonials".to_string(),
                details: format!("expected an object, got {}", item),
            });
        };
        let text = match entry.get("text") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        let author = match entry.get("author") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => "Anonymous".to_string(),
        };
        node = node.with_child(
            VNode::element("blockquote")
                .with_child(paragraph(text))
                .with_child(VNode::element("cite").with_text(format!("- {}", author))),
        );
    }
    Ok(node)
}

/// Catch-all for library types without a dedicated renderer: title plus raw data
pub fn generic(component: &Component) -> RenderResult<VNode> {
    let component_type = &component.component_type;
    let mut chars = component_type.chars();
    let title = match chars.next() {
        Some(first) => format!("{}{} Component", first.to_uppercase(), chars.as_str()),
        None => "Component".to_string(),
    };

    let pretty = serde_json::to_string_pretty(&component.data).map_err(|e| {
        RenderError::ComponentFailed {
            component_type: component_type.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(
        VNode::div(format!("gmkb-generic gmkb-generic--{}", component_type))
            .with_child(heading(3, title))
            .with_child(VNode::element("pre").with_text(pretty)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(component_type: &str, data: Value) -> Component {
        Component::new("c1", component_type, "s1").with_data(data.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn test_hero_defaults() {
        let node = hero(&component("hero", json!({}))).unwrap();
        assert_eq!(node.text_content(), "Guest Name");
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_hero_uses_full_name() {
        let node = hero(&component("hero", json!({ "full_name": "Ada", "subtitle": "Engineer" }))).unwrap();
        assert_eq!(node.children()[0].text_content(), "Ada");
        assert_eq!(node.children()[1].tag(), Some("h2"));
    }

    #[test]
    fn test_topics_list_and_empty() {
        let node = topics(&component("topics", json!({ "topics": ["Rust", { "title": "WASM" }] }))).unwrap();
        let list = &node.children()[1];
        assert_eq!(list.tag(), Some("ul"));
        assert_eq!(list.children()[1].text_content(), "WASM");

        let empty = topics(&component("topics", json!({}))).unwrap();
        assert_eq!(empty.children()[1].text_content(), "No topics available.");
    }

    #[test]
    fn test_topics_wrong_shape_is_an_error() {
        let err = topics(&component("topics", json!({ "topics": "Rust, WASM" }))).unwrap_err();
        assert!(matches!(err, RenderError::InvalidField { .. }));
    }

    #[test]
    fn test_contact_only_present_fields() {
        let node = contact(&component("contact", json!({ "email": "a@b.c" }))).unwrap();
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[1].text_content(), "Email: a@b.c");
    }

    #[test]
    fn test_testimonials_default_author() {
        let node = testimonials(&component(
            "testimonials",
            json!({ "testimonials": [{ "text": "Great talk" }] }),
        ))
        .unwrap();
        assert_eq!(node.children()[1].text_content(), "Great talk- Anonymous");
    }

    #[test]
    fn test_generic_title() {
        let node = generic(&component("stats", json!({ "count": 3 }))).unwrap();
        assert_eq!(node.children()[0].text_content(), "Stats Component");
        assert!(node.children()[1].text_content().contains("\"count\": 3"));
    }
}
