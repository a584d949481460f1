//! Markup rendering of a [`Schema`].
//!
//! Every node becomes one absolutely positioned element:
//!
//! | Node type   | Element                         |
//! |-------------|---------------------------------|
//! | `container` | `<div>`                         |
//! | `text`      | `<k-text>` or `<k-display>`     |
//! | `button`    | `<button>`                      |
//! | `canvas`    | `<canvas>`                      |
//! | `image`     | `<img ... />` (self-closing)    |
//! | `list-item` | `<template>` wrapping children  |

use std::fmt::Write;

use crate::{NodeType, Schema, SchemaNode};

/// Renders schemas to an HTML-like markup string.
///
/// Rendering is a pure tree walk; the renderer holds only formatting options.
#[derive(Debug, Clone)]
pub struct MarkupRenderer {
    indent: String,
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::with_indent("  ")
    }
}

impl MarkupRenderer {
    /// Renderer indenting each nesting level with `indent`.
    #[must_use]
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    /// Render the whole schema, starting at its root.
    #[must_use]
    pub fn render(&self, schema: &Schema) -> String {
        let mut out = String::with_capacity(256 * schema.root.node_count());
        self.render_node(&mut out, &schema.root, 0);
        out
    }

    /// Render a single subtree at the given nesting level.
    #[must_use]
    pub fn render_subtree(&self, node: &SchemaNode, level: usize) -> String {
        let mut out = String::new();
        self.render_node(&mut out, node, level);
        out
    }

    fn render_node(&self, out: &mut String, node: &SchemaNode, level: usize) {
        let pad = self.indent.repeat(level);
        let id = escape_attr(node.markup_id());
        let style = style_attr(node);

        let tag = match node.node_type {
            NodeType::ListItem => {
                let _ = writeln!(out, "{pad}<template id=\"{id}\">");
                self.render_children(out, node, level);
                let _ = write!(out, "\n{pad}</template>");
                return;
            }
            NodeType::Image => {
                let src = escape_attr(node.src.as_deref().unwrap_or_default());
                let _ = write!(
                    out,
                    "{pad}<img id=\"{id}\" src=\"{src}\" style=\"{style}\" />"
                );
                return;
            }
            NodeType::Text if node.is_display == Some(true) => "k-display",
            NodeType::Text => "k-text",
            NodeType::Button => "button",
            NodeType::Canvas => "canvas",
            NodeType::Container => "div",
        };

        let _ = write!(out, "{pad}<{tag} id=\"{id}\" style=\"{style}\">");
        if !node.children().is_empty() {
            out.push('\n');
            self.render_children(out, node, level);
            let _ = write!(out, "\n{pad}</{tag}>");
        } else {
            if let Some(text) = node.text.as_deref() {
                out.push_str(&escape_text(text));
            }
            let _ = write!(out, "</{tag}>");
        }
    }

    fn render_children(&self, out: &mut String, node: &SchemaNode, level: usize) {
        for (i, child) in node.children().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.render_node(out, child, level + 1);
        }
    }
}

/// Render a schema with default formatting.
#[must_use]
pub fn render_markup(schema: &Schema) -> String {
    MarkupRenderer::default().render(schema)
}

/// Inline CSS for a node: absolute geometry first, then each optional
/// attribute that is set, in a fixed order.
#[must_use]
pub fn style_attr(node: &SchemaNode) -> String {
    let style = &node.style;
    let mut css = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px",
        style.x, style.y, style.width, style.height
    );
    if let Some(color) = &style.color {
        let _ = write!(css, "; color: {}", escape_attr(color));
    }
    if let Some(background) = &style.background_color {
        let _ = write!(css, "; background-color: {}", escape_attr(background));
    }
    if let Some(width) = style.border_width {
        let _ = write!(css, "; border: {width}px solid currentColor");
    }
    if let Some(opacity) = style.opacity {
        let _ = write!(css, "; opacity: {opacity}");
    }
    css
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
