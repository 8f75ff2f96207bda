use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute map; insertion order is kept so HTML output is stable
pub type Attributes = IndexMap<String, String>;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: Attributes,
        children: Vec<VNode>,
        /// Stable identity among siblings (component or section id)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            key: None,
        }
    }

    /// `<div class="...">`, the most common node in the preview
    pub fn div(class: impl Into<String>) -> Self {
        VNode::element("div").with_attr("class", class)
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append a text child
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(VNode::text(content))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Element { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Comment { .. } => String::new(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }

    /// Depth-first search, this node included
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(predicate))
    }

    /// Every node (this one included) matching the predicate, in document order
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&VNode) -> bool, out: &mut Vec<&'a VNode>) {
        if predicate(self) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all(predicate, out);
        }
    }
}

/// Virtual Document (root nodes plus document-level CSS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub nodes: Vec<VNode>,
    pub styles: Vec<CssRule>,
}

/// CSS Rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub properties: IndexMap<String, String>,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    pub fn add_style(
        &mut self,
        selector: impl Into<String>,
        properties: IndexMap<String, String>,
    ) {
        self.styles.push(CssRule {
            selector: selector.into(),
            properties,
        });
    }

    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        self.nodes.iter().find_map(|n| n.find(predicate))
    }

    pub fn find_all(&self, predicate: &dyn Fn(&VNode) -> bool) -> Vec<&VNode> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.find_all(predicate, &mut out);
        }
        out
    }
}

impl Default for VirtualDomDocument {
    fn default() -> Self {
        Self::new()
    }
}
