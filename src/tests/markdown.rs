use super::MarkdownFormat;
use crate::doctree::DocTree;
use crate::formats::Format;
use crate::node::{LinkReference, NodeKind};
use std::path::Path;

fn read(source: &str) -> DocTree {
    MarkdownFormat
        .read(source, Path::new("/src/guide.md"), "guide")
        .unwrap()
}

fn first(tree: &DocTree, pred: impl Fn(&NodeKind) -> bool + 'static) -> usize {
    tree.find_all(pred).next().expect("node should exist")
}

const GUIDE: &str = "\
# Guide

Intro with *very* little to say.

(install)=
## Install

```{abstract}
Summary A
```

Body text with {link}`setup` here.

```{rubric} Further reading
```

```rust
fn main() {}
```
";

#[test]
fn test_document_root_records_source() {
    let tree = read(GUIDE);

    assert_eq!(
        tree.kind(DocTree::ROOT),
        &NodeKind::Document {
            source: "/src/guide.md".into()
        }
    );
}

#[test]
fn test_headings_open_nested_sections() {
    let tree = read(GUIDE);
    let sections: Vec<_> = tree
        .find_all(|k| matches!(k, NodeKind::Section))
        .collect();

    assert_eq!(sections.len(), 2);
    let titles: Vec<_> = sections
        .iter()
        .map(|&s| {
            let title = tree.first_child(s, |k| matches!(k, NodeKind::Title)).unwrap();
            tree.astext(title)
        })
        .collect();
    assert_eq!(titles, vec!["Guide", "Install"]);
    assert_eq!(
        tree.nearest_ancestor(sections[1], |k| matches!(k, NodeKind::Section)),
        Some(sections[0]),
        "Install nests inside Guide"
    );
}

#[test]
fn test_label_attaches_to_following_section() {
    let tree = read(GUIDE);
    let target = first(&tree, |k| matches!(k, NodeKind::Target { .. }));
    let owner = tree.parent(target).unwrap();

    assert_eq!(
        tree.kind(target),
        &NodeKind::Target {
            refid: "install".into()
        }
    );
    assert_eq!(tree.kind(owner), &NodeKind::Section);
    assert_eq!(tree.children(owner)[0], target, "Target is the first child");
    let title = tree.first_child(owner, |k| matches!(k, NodeKind::Title)).unwrap();
    assert_eq!(tree.astext(title), "Install");
}

#[test]
fn test_abstract_body_is_parsed_as_markdown() {
    let tree = read(GUIDE);
    let block = first(&tree, |k| matches!(k, NodeKind::Abstract));
    let paragraph = tree
        .first_child(block, |k| matches!(k, NodeKind::Paragraph))
        .unwrap();

    assert_eq!(tree.astext(paragraph), "Summary A");
    assert_eq!(tree.astext(block), "Summary A");
}

#[test]
fn test_link_role_becomes_link_reference() {
    let tree = read(GUIDE);
    let link = first(&tree, |k| matches!(k, NodeKind::Link(_)));
    let paragraph = tree.parent(link).unwrap();

    assert_eq!(
        tree.kind(link),
        &NodeKind::Link(LinkReference::new("setup", "guide"))
    );
    assert_eq!(tree.astext(paragraph), "Body text with setup here.");
}

#[test]
fn test_emphasis_markers_are_dropped() {
    let tree = read(GUIDE);
    let paragraph = first(&tree, |k| matches!(k, NodeKind::Paragraph));

    assert_eq!(tree.astext(paragraph), "Intro with very little to say.");
}

#[test]
fn test_rubric_directive() {
    let tree = read(GUIDE);
    let rubric = first(&tree, |k| matches!(k, NodeKind::Rubric));
    let title = tree
        .first_child(rubric, |k| matches!(k, NodeKind::Title))
        .unwrap();

    assert_eq!(tree.astext(title), "Further reading");
}

#[test]
fn test_plain_fence_is_literal_block() {
    let tree = read(GUIDE);
    let block = first(&tree, |k| matches!(k, NodeKind::LiteralBlock(_)));

    assert_eq!(tree.astext(block).trim(), "fn main() {}");
}

#[test]
fn test_code_span_alone_is_literal() {
    let tree = read("```{abstract}\n`frobnicate()`\n\nLonger text.\n```\n");
    let block = first(&tree, |k| matches!(k, NodeKind::Abstract));
    let paragraph = tree
        .first_child(block, |k| matches!(k, NodeKind::Paragraph))
        .unwrap();

    let children = tree.children(paragraph);
    assert_eq!(children.len(), 1);
    assert_eq!(
        tree.kind(children[0]),
        &NodeKind::Literal("frobnicate()".into())
    );
    assert_eq!(tree.astext(block), "frobnicate()\n\nLonger text.");
}

#[test]
fn test_label_without_heading_stays_in_place() {
    let tree = read("Some text.\n\n(orphan)=\n\nMore text.\n");
    let target = first(&tree, |k| matches!(k, NodeKind::Target { .. }));

    assert_eq!(tree.parent(target), Some(DocTree::ROOT));
    assert!(tree
        .find_all(|k| matches!(k, NodeKind::Section))
        .next()
        .is_none());
}

#[test]
fn test_label_before_rubric() {
    let tree = read("(reading)=\n```{rubric} Reading\n```\n");
    let rubric = first(&tree, |k| matches!(k, NodeKind::Rubric));

    assert_eq!(
        tree.kind(tree.children(rubric)[0]),
        &NodeKind::Target {
            refid: "reading".into()
        }
    );
}
