//! Output writers and the per-format callbacks for the two custom node kinds.
//!
//! Abstracts only exist to feed the metadata build and are dropped from every
//! rendered output. Links are rendered as anchors in HTML and dropped
//! elsewhere, since only HTML can carry the tooltip.

use crate::doctree::{DocTree, NodeId};
use crate::node::{LinkReference, NodeKind};
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Kinds of output a build can produce.
pub enum OutputFormat {
    /// One HTML page per document.
    Html,
    /// One LaTeX fragment per document.
    Latex,
    /// One plain-text file per document.
    Text,
    /// No documents; section metadata only.
    Meta,
}

impl OutputFormat {
    #[must_use]
    /// Lowercase name of the format, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Latex => "latex",
            Self::Text => "text",
            Self::Meta => "meta",
        }
    }

    #[must_use]
    /// File extension of written documents, `None` for formats that write none.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("html"),
            Self::Latex => Some("tex"),
            Self::Text => Some("txt"),
            Self::Meta => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
/// What a writer does on meeting a node.
pub enum Visit {
    /// Drop the node and everything below it.
    Skip,
    /// Use the writer's ordinary handling.
    Descend,
    /// Emit `open`, the children, then `close`.
    Wrap {
        /// Markup written on entering the node.
        open: String,
        /// Markup written on leaving the node.
        close: String,
    },
}

#[must_use]
/// Per-format handling of abstract blocks and links.
pub fn visit(format: OutputFormat, kind: &NodeKind) -> Visit {
    match kind {
        NodeKind::Abstract if format == OutputFormat::Meta => Visit::Descend,
        NodeKind::Link(link) if format == OutputFormat::Html => Visit::Wrap {
            open: link_open_html(link),
            close: "</a>".to_string(),
        },
        NodeKind::Abstract | NodeKind::Link(_) => Visit::Skip,
        _ => Visit::Descend,
    }
}

#[must_use]
/// Opening anchor tag and visible text of a link.
///
/// Attribute values are escaped. The visible text is escaped too, except for
/// a title that is a single `<code>` element: those come from code spans and
/// already hold escaped code, so they are written as markup.
pub fn link_open_html(link: &LinkReference) -> String {
    let (uri, title) = link.resolution.as_ref().map_or(("", ""), |r| {
        (r.resolved_uri.as_str(), r.tooltip_title.as_str())
    });
    format!(
        r#"<a class="reference internal precis" href="{}" title="{}">{}"#,
        html_escape(uri),
        html_escape(title),
        link_text_html(link.text())
    )
}

fn link_text_html(text: &str) -> String {
    match text
        .strip_prefix("<code>")
        .and_then(|t| t.strip_suffix("</code>"))
    {
        Some(code) if !code.contains(['<', '>']) => text.to_string(),
        _ => html_escape(text),
    }
}

#[must_use]
/// Render a whole document tree, or `None` for formats that write no documents.
pub fn write(tree: &DocTree, format: OutputFormat) -> Option<String> {
    format.extension()?;
    let mut writer = Writer {
        format,
        out: String::new(),
    };
    writer.node(tree, DocTree::ROOT, 0);
    Some(writer.out)
}

struct Writer {
    format: OutputFormat,
    out: String,
}

impl Writer {
    fn node(&mut self, tree: &DocTree, id: NodeId, depth: usize) {
        let kind = tree.kind(id);
        match visit(self.format, kind) {
            Visit::Skip => return,
            Visit::Wrap { open, close } => {
                self.out.push_str(&open);
                self.children(tree, id, depth);
                self.out.push_str(&close);
                return;
            }
            Visit::Descend => {}
        }

        match self.format {
            OutputFormat::Html => self.html(tree, id, depth),
            OutputFormat::Latex => self.latex(tree, id, depth),
            OutputFormat::Text | OutputFormat::Meta => self.text(tree, id, depth),
        }
    }

    fn children(&mut self, tree: &DocTree, id: NodeId, depth: usize) {
        for &child in tree.children(id) {
            self.node(tree, child, depth);
        }
    }

    fn html(&mut self, tree: &DocTree, id: NodeId, depth: usize) {
        match tree.kind(id) {
            NodeKind::Section => {
                self.out.push_str("<section>\n");
                self.children(tree, id, depth + 1);
                self.out.push_str("</section>\n");
            }
            NodeKind::Title => {
                let level = depth.clamp(1, 6);
                let _ = write!(self.out, "<h{level}>");
                self.children(tree, id, depth);
                let _ = writeln!(self.out, "</h{level}>");
            }
            NodeKind::Rubric => {
                self.out.push_str(r#"<p class="rubric">"#);
                for &child in tree.children(id) {
                    match tree.kind(child) {
                        NodeKind::Title => self.children(tree, child, depth),
                        _ => self.node(tree, child, depth),
                    }
                }
                self.out.push_str("</p>\n");
            }
            NodeKind::Paragraph => {
                self.out.push_str("<p>");
                self.children(tree, id, depth);
                self.out.push_str("</p>\n");
            }
            NodeKind::Text(text) => self.out.push_str(&html_escape(text)),
            NodeKind::Literal(code) => {
                let _ = write!(self.out, "<code>{}</code>", html_escape(code));
            }
            NodeKind::LiteralBlock(code) => {
                let _ = writeln!(self.out, "<pre>{}</pre>", html_escape(code));
            }
            NodeKind::Target { refid } => {
                let _ = write!(self.out, r#"<span id="{}"></span>"#, html_escape(refid));
            }
            NodeKind::Document { .. } | NodeKind::Abstract | NodeKind::Link(_) => {
                self.children(tree, id, depth);
            }
        }
    }

    fn latex(&mut self, tree: &DocTree, id: NodeId, depth: usize) {
        match tree.kind(id) {
            NodeKind::Section => self.children(tree, id, depth + 1),
            NodeKind::Title => {
                let command = match depth {
                    0 | 1 => "section",
                    2 => "subsection",
                    _ => "subsubsection",
                };
                let _ = write!(self.out, "\\{command}{{");
                self.children(tree, id, depth);
                self.out.push_str("}\n\n");
            }
            NodeKind::Rubric => {
                self.out.push_str("\\paragraph*{");
                let text = tree.astext(id);
                self.out.push_str(&latex_escape(&text));
                self.out.push_str("}\n\n");
            }
            NodeKind::Paragraph => {
                self.children(tree, id, depth);
                self.out.push_str("\n\n");
            }
            NodeKind::Text(text) => self.out.push_str(&latex_escape(text)),
            NodeKind::Literal(code) => {
                let _ = write!(self.out, "\\texttt{{{}}}", latex_escape(code));
            }
            NodeKind::LiteralBlock(code) => {
                let _ = write!(
                    self.out,
                    "\\begin{{verbatim}}\n{}\n\\end{{verbatim}}\n\n",
                    code.trim_end()
                );
            }
            NodeKind::Target { refid } => {
                let _ = write!(self.out, "\\label{{{}}}", latex_escape(refid));
            }
            NodeKind::Document { .. } | NodeKind::Abstract | NodeKind::Link(_) => {
                self.children(tree, id, depth);
            }
        }
    }

    fn text(&mut self, tree: &DocTree, id: NodeId, depth: usize) {
        match tree.kind(id) {
            NodeKind::Section => self.children(tree, id, depth + 1),
            NodeKind::Title => {
                let start = self.out.len();
                self.children(tree, id, depth);
                let width = self.out[start..].chars().count();
                let rule = if depth <= 1 { '=' } else { '-' };
                self.out.push('\n');
                self.out.extend(std::iter::repeat_n(rule, width));
                self.out.push_str("\n\n");
            }
            NodeKind::Paragraph => {
                self.children(tree, id, depth);
                self.out.push_str("\n\n");
            }
            NodeKind::Text(text) | NodeKind::Literal(text) => self.out.push_str(text),
            NodeKind::LiteralBlock(code) => {
                for line in code.lines() {
                    let _ = writeln!(self.out, "    {line}");
                }
                self.out.push('\n');
            }
            NodeKind::Target { .. } => {}
            NodeKind::Document { .. }
            | NodeKind::Rubric
            | NodeKind::Abstract
            | NodeKind::Link(_) => self.children(tree, id, depth),
        }
    }
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn latex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
