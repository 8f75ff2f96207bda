//! Static HTML output for a rendered layout

use crate::vdom::{CssRule, VNode, VirtualDomDocument};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Page title for full documents
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Media Kit".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Complete `<!DOCTYPE html>` page with the document's style rules in the head
pub fn render_document(doc: &VirtualDomDocument, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&options.title)));
    if !doc.styles.is_empty() {
        ctx.add_line("<style id=\"gmkb-theme-styles\">");
        ctx.indent();
        for rule in &doc.styles {
            write_rule(rule, &mut ctx);
        }
        ctx.dedent();
        ctx.add_line("</style>");
    }
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in &doc.nodes {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

/// Markup for the nodes only, no page shell or styles
pub fn render_fragment(nodes: &[VNode], options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.get_output()
}

fn write_rule(rule: &CssRule, ctx: &mut Context) {
    ctx.add_line(&format!("{} {{", rule.selector));
    ctx.indent();
    for (name, value) in &rule.properties {
        ctx.add_line(&format!("{}: {};", name, value));
    }
    ctx.dedent();
    ctx.add_line("}");
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                ctx.newline();
                return;
            }
            ctx.add(">");

            if has_element_children(children) {
                ctx.newline();
                ctx.indent();
                for child in children {
                    write_node(child, ctx);
                }
                ctx.dedent();
                if ctx.options.pretty {
                    ctx.add_indent();
                }
            } else {
                for child in children {
                    write_inline(child, ctx);
                }
            }

            ctx.add(&format!("</{}>", tag));
            ctx.newline();
        }
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Comment { content } => ctx.add_line(&format!("<!-- {} -->", content)),
    }
}

fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Comment { content } => ctx.add(&format!("<!-- {} -->", content)),
        VNode::Element { .. } => write_node(node, ctx),
    }
}

fn has_element_children(children: &[VNode]) -> bool {
    children.iter().any(|c| matches!(c, VNode::Element { .. }))
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "area" | "col" | "embed" | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_fragment_layout() {
        let node = VNode::div("gmkb-hero")
            .with_child(VNode::element("h1").with_text("Jane <Doe>"))
            .with_child(VNode::element("br"));

        let html = render_fragment(&[node], &HtmlOptions::default());
        assert_eq!(
            html,
            "<div class=\"gmkb-hero\">\n  <h1>Jane &lt;Doe&gt;</h1>\n  <br />\n</div>\n"
        );
    }

    #[test]
    fn test_compact_output() {
        let options = HtmlOptions {
            pretty: false,
            ..HtmlOptions::default()
        };
        let node = VNode::div("a").with_child(VNode::element("p").with_text("x"));
        assert_eq!(render_fragment(&[node], &options), "<div class=\"a\"><p>x</p></div>");
    }

    #[test]
    fn test_document_includes_styles() {
        let mut doc = VirtualDomDocument::new();
        doc.add_style(
            ":root",
            [("--gmkb-color-primary".to_string(), "#295cff".to_string())]
                .into_iter()
                .collect(),
        );
        doc.add_node(VNode::div("preview-area"));

        let html = render_document(&doc, &HtmlOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(html.contains("      :root {\n        --gmkb-color-primary: #295cff;\n      }\n"));
        assert!(html.contains("<div class=\"preview-area\"></div>"));
    }
}
