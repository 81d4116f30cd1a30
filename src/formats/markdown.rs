//! MyST-flavoured Markdown reader using tree-sitter-md.
//!
//! Headings open sections following tree-sitter-md's `section` nesting.
//! Fenced blocks whose info string names a directive (`{abstract}`,
//! `{rubric}`) become the matching nodes, `(label)=` lines become targets,
//! and `` {link}`id` `` roles become link references.

use crate::directives::{self, Directive};
use crate::doctree::{DocTree, NodeId};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::node::{LinkReference, NodeKind};
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter grammars and queries for Markdown sources.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn inline_language(&self) -> tree_sitter::Language {
        tree_sitter_md::INLINE_LANGUAGE.into()
    }

    fn inline_query(&self) -> &'static str {
        "[(code_span) @literal (emphasis_delimiter) @delimiter]"
    }

    fn read(&self, source: &str, path: &Path, docname: &str) -> Result<DocTree> {
        let mut reader = Reader::new(self, path, docname)?;
        let mut tree = DocTree::new(NodeKind::Document {
            source: path.to_path_buf(),
        });
        reader.read_blocks(source, &mut tree, DocTree::ROOT)?;
        Ok(tree)
    }
}

/// Parsing state for one source file.
struct Reader<'a> {
    block_parser: Parser,
    inline_parser: Parser,
    inline_query: Query,
    path: PathBuf,
    docname: &'a str,
    /// Label from a `(label)=` line waiting for the block it names.
    pending_target: Option<String>,
}

impl<'a> Reader<'a> {
    fn new(format: &impl Format, path: &Path, docname: &'a str) -> Result<Self> {
        let mut block_parser = Parser::new();
        block_parser.set_language(&format.language())?;
        let inline_language = format.inline_language();
        let mut inline_parser = Parser::new();
        inline_parser.set_language(&inline_language)?;
        let inline_query = Query::new(&inline_language, format.inline_query())?;

        Ok(Self {
            block_parser,
            inline_parser,
            inline_query,
            path: path.to_path_buf(),
            docname,
            pending_target: None,
        })
    }

    /// Parse `source` as a block sequence and append it under `parent`.
    fn read_blocks(&mut self, source: &str, tree: &mut DocTree, parent: NodeId) -> Result<()> {
        let ts_tree = self
            .block_parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse(self.path.clone()))?;
        self.block(ts_tree.root_node(), source, tree, parent)?;
        self.flush_target(tree, parent);
        Ok(())
    }

    fn block(
        &mut self,
        node: Node,
        src: &str,
        tree: &mut DocTree,
        parent: NodeId,
    ) -> Result<()> {
        match node.kind() {
            "section" => self.section(node, src, tree, parent),
            "paragraph" => {
                let text = inline_text(node, src);
                self.flush_target(tree, parent);
                if let Some(label) = directives::target_label(text) {
                    self.pending_target = Some(label.to_string());
                } else {
                    let paragraph = tree.push(parent, NodeKind::Paragraph);
                    self.inline(text, tree, paragraph);
                }
                Ok(())
            }
            "fenced_code_block" => self.fenced_block(node, src, tree, parent),
            "indented_code_block" => {
                self.flush_target(tree, parent);
                let code = node_text(node, src).to_string();
                tree.push(parent, NodeKind::LiteralBlock(code));
                Ok(())
            }
            _ => {
                for child in named_children(node) {
                    self.block(child, src, tree, parent)?;
                }
                Ok(())
            }
        }
    }

    fn section(
        &mut self,
        node: Node,
        src: &str,
        tree: &mut DocTree,
        parent: NodeId,
    ) -> Result<()> {
        let children = named_children(node);
        let heading = children
            .first()
            .copied()
            .filter(|c| matches!(c.kind(), "atx_heading" | "setext_heading"));

        // Content ahead of the first heading is wrapped in a heading-less
        // section by the grammar; it belongs to the enclosing node.
        let Some(heading) = heading else {
            for child in children {
                self.block(child, src, tree, parent)?;
            }
            return Ok(());
        };

        let section = tree.push(parent, NodeKind::Section);
        self.attach_target(tree, section);
        let title = tree.push(section, NodeKind::Title);
        self.inline(heading_text(heading, src), tree, title);

        for child in children.into_iter().skip(1) {
            self.block(child, src, tree, section)?;
        }
        Ok(())
    }

    fn fenced_block(
        &mut self,
        node: Node,
        src: &str,
        tree: &mut DocTree,
        parent: NodeId,
    ) -> Result<()> {
        let info = child_of_kind(node, "info_string").map_or("", |n| node_text(n, src));
        let content =
            child_of_kind(node, "code_fence_content").map_or("", |n| node_text(n, src));

        match directives::directive(info) {
            Some(Directive::Abstract) => {
                self.flush_target(tree, parent);
                let block = tree.push(parent, NodeKind::Abstract);
                self.read_blocks(content, tree, block)?;
            }
            Some(Directive::Rubric(heading)) => {
                let rubric = tree.push(parent, NodeKind::Rubric);
                self.attach_target(tree, rubric);
                let title = tree.push(rubric, NodeKind::Title);
                self.inline(heading, tree, title);
            }
            Some(Directive::Other(_)) | None => {
                self.flush_target(tree, parent);
                tree.push(parent, NodeKind::LiteralBlock(content.to_string()));
            }
        }
        Ok(())
    }

    /// Give a pending label to a freshly opened section or rubric.
    fn attach_target(&mut self, tree: &mut DocTree, owner: NodeId) {
        if let Some(refid) = self.pending_target.take() {
            tree.push(owner, NodeKind::Target { refid });
        }
    }

    /// Leave a pending label where it stands when no heading follows it.
    fn flush_target(&mut self, tree: &mut DocTree, parent: NodeId) {
        if let Some(refid) = self.pending_target.take() {
            tree.push(parent, NodeKind::Target { refid });
        }
    }

    /// Split inline markup into text, literal and link nodes under `parent`.
    fn inline(&mut self, text: &str, tree: &mut DocTree, parent: NodeId) {
        let text = text.trim();
        let Some(inline_tree) = self.inline_parser.parse(text, None) else {
            push_text(tree, parent, text);
            return;
        };

        let names = self.inline_query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut captures =
            cursor.captures(&self.inline_query, inline_tree.root_node(), text.as_bytes());
        let mut pos = 0;

        while let Some((query_match, capture_index)) = captures.next() {
            let capture = query_match.captures[*capture_index];
            let node = capture.node;
            if node.start_byte() < pos {
                continue;
            }
            let before = &text[pos..node.start_byte()];

            if names[capture.index as usize] == "literal" {
                let code = code_span_text(node, text).to_string();
                if let Some(rest) = directives::strip_link_role(before) {
                    push_text(tree, parent, rest);
                    tree.push(
                        parent,
                        NodeKind::Link(LinkReference::new(code, self.docname)),
                    );
                } else {
                    push_text(tree, parent, before);
                    tree.push(parent, NodeKind::Literal(code));
                }
            } else {
                push_text(tree, parent, before);
            }
            pos = node.end_byte();
        }

        push_text(tree, parent, &text[pos..]);
    }
}

fn push_text(tree: &mut DocTree, parent: NodeId, text: &str) {
    if !text.is_empty() {
        tree.push(parent, NodeKind::Text(text.to_string()));
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|c| c.kind() == kind)
}

fn node_text<'s>(node: Node, src: &'s str) -> &'s str {
    node.utf8_text(src.as_bytes()).unwrap_or_default()
}

/// Source text of the `inline` child of a paragraph.
fn inline_text<'s>(paragraph: Node, src: &'s str) -> &'s str {
    child_of_kind(paragraph, "inline").map_or("", |n| node_text(n, src))
}

fn heading_text<'s>(heading: Node, src: &'s str) -> &'s str {
    if heading.kind() == "setext_heading" {
        child_of_kind(heading, "paragraph").map_or("", |p| inline_text(p, src))
    } else {
        child_of_kind(heading, "inline").map_or("", |n| node_text(n, src))
    }
}

/// Contents of a code span without its backtick delimiters.
fn code_span_text<'s>(span: Node, src: &'s str) -> &'s str {
    let delimiters: Vec<Node> = named_children(span)
        .into_iter()
        .filter(|c| c.kind() == "code_span_delimiter")
        .collect();
    let start = delimiters.first().map_or(span.start_byte(), Node::end_byte);
    let end = match delimiters.as_slice() {
        [_, .., last] => last.start_byte(),
        _ => span.end_byte(),
    };
    let code = &src[start..end.max(start)];

    // One padding space on each side is not part of the code.
    match code.strip_prefix(' ').and_then(|c| c.strip_suffix(' ')) {
        Some(inner) if !inner.trim().is_empty() => inner,
        _ => code,
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
