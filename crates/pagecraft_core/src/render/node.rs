//! Render tree and HTML serialization.
//!
//! Renderers build a small element tree instead of concatenating strings, so
//! the same output can be inspected in tests, emitted as JSON for a preview
//! client, or serialized to HTML for the public page.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// One node of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    Element(Element),
    Text { value: String },
    /// Operator-authored markup emitted verbatim.
    RawHtml { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<(String, String)>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

/// Starts a new element.
pub fn el(tag: &str) -> Element {
    Element {
        tag: tag.to_string(),
        classes: Vec::new(),
        styles: Vec::new(),
        attributes: BTreeMap::new(),
        children: Vec::new(),
    }
}

/// Escaped text node.
pub fn text(value: impl Into<String>) -> RenderNode {
    RenderNode::Text {
        value: value.into(),
    }
}

pub fn raw_html(value: impl Into<String>) -> RenderNode {
    RenderNode::RawHtml {
        value: value.into(),
    }
}

impl Element {
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Adds a CSS declaration; blank values are skipped so unset overrides
    /// fall through to the theme.
    pub fn style(mut self, property: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.styles.push((property.to_string(), value.to_string()));
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<RenderNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RenderNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|value| value == class)
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for RenderNode {
    fn from(value: Element) -> Self {
        RenderNode::Element(value)
    }
}

impl RenderNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            RenderNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Depth-first list of elements carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_class(self, class, &mut found);
        found
    }

    /// Concatenated text content (raw HTML excluded).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn collect_by_class<'a>(node: &'a RenderNode, class: &str, found: &mut Vec<&'a Element>) {
    if let RenderNode::Element(element) = node {
        if element.has_class(class) {
            found.push(element);
        }
        for child in &element.children {
            collect_by_class(child, class, found);
        }
    }
}

fn collect_text(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
        RenderNode::Text { value } => out.push_str(value),
        RenderNode::RawHtml { .. } => {}
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Text { value } => out.push_str(&escape_html(value)),
        RenderNode::RawHtml { value } => out.push_str(value),
        RenderNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    let _ = write!(out, "<{}", element.tag);
    if !element.classes.is_empty() {
        let _ = write!(
            out,
            " class=\"{}\"",
            escape_html(&element.classes.join(" "))
        );
    }
    if !element.styles.is_empty() {
        let declarations: Vec<String> = element
            .styles
            .iter()
            .map(|(property, value)| format!("{property}:{value}"))
            .collect();
        let _ = write!(out, " style=\"{}\"", escape_html(&declarations.join(";")));
    }
    for (name, value) in &element.attributes {
        let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(child, out);
    }
    let _ = write!(out, "</{}>", element.tag);
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{el, raw_html, text, RenderNode};

    #[test]
    fn serializes_classes_styles_and_sorted_attributes() {
        let node = el("a")
            .class("btn")
            .style("color", "#fff")
            .style("background", "  ")
            .attr("target", "_blank")
            .attr("href", "#checkout")
            .text("Order");
        assert_eq!(
            RenderNode::from(node).to_html(),
            "<a class=\"btn\" style=\"color:#fff\" href=\"#checkout\" target=\"_blank\">Order</a>"
        );
    }

    #[test]
    fn escapes_text_but_not_raw_html() {
        let node = el("div")
            .child(text("<b>&"))
            .child(raw_html("<i>ok</i>"));
        assert_eq!(
            RenderNode::from(node).to_html(),
            "<div>&lt;b&gt;&amp;<i>ok</i></div>"
        );
    }

    #[test]
    fn void_tags_have_no_closing_tag() {
        let html = RenderNode::from(el("img").attr("src", "a.png")).to_html();
        assert_eq!(html, "<img src=\"a.png\">");
    }
}
