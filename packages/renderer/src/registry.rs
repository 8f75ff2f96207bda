//! Component type → render function

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use mediakit_editor::Component;

use crate::builtins;
use crate::errors::RenderResult;
use crate::vdom::VNode;

pub type RenderFn = Box<dyn Fn(&Component) -> RenderResult<VNode>>;

/// Library entry shown in the "Add Component" list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    pub description: String,
}

pub struct ComponentRegistry {
    renderers: IndexMap<String, RenderFn>,
    library: IndexMap<String, ComponentInfo>,
}

impl ComponentRegistry {
    /// Registry with nothing in it
    pub fn new() -> Self {
        Self {
            renderers: IndexMap::new(),
            library: IndexMap::new(),
        }
    }

    /// Registry with the builtin component types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_with_info("hero", "Hero", "Hero section with title and image", builtins::hero);
        registry.register_with_info("biography", "Biography", "Professional biography", builtins::biography);
        registry.register_with_info("topics", "Topics", "Speaking topics list", builtins::topics);
        registry.register_with_info("contact", "Contact", "Contact information", builtins::contact);
        registry.register_with_info("cta", "Call to Action", "CTA button section", builtins::cta);
        registry.register("call-to-action", builtins::cta);
        registry.register_with_info(
            "testimonials",
            "Testimonials",
            "Client testimonials",
            builtins::testimonials,
        );
        registry
    }

    /// Register (or replace) the renderer for a type
    pub fn register<F>(&mut self, component_type: impl Into<String>, render: F)
    where
        F: Fn(&Component) -> RenderResult<VNode> + 'static,
    {
        let component_type = component_type.into();
        debug!(component_type = %component_type, "Registered component renderer");
        self.renderers.insert(component_type, Box::new(render));
    }

    /// Register a renderer and list the type in the component library
    pub fn register_with_info<F>(
        &mut self,
        component_type: &str,
        name: &str,
        description: &str,
        render: F,
    ) where
        F: Fn(&Component) -> RenderResult<VNode> + 'static,
    {
        self.register(component_type, render);
        self.library.insert(
            component_type.to_string(),
            ComponentInfo {
                component_type: component_type.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            },
        );
    }

    /// Give a type the generic title-and-data renderer
    pub fn register_generic(&mut self, component_type: impl Into<String>) {
        self.register(component_type, builtins::generic);
    }

    pub fn unregister(&mut self, component_type: &str) -> bool {
        self.library.shift_remove(component_type);
        self.renderers.shift_remove(component_type).is_some()
    }

    pub fn get(&self, component_type: &str) -> Option<&RenderFn> {
        self.renderers.get(component_type)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.renderers.contains_key(component_type)
    }

    /// Registered type names, in registration order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    pub fn library(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.library.values()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
