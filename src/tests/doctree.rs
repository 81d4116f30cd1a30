use super::DocTree;
use crate::node::NodeKind;
use std::path::PathBuf;

fn text(s: &str) -> NodeKind {
    NodeKind::Text(s.to_string())
}

/// document > section > [title "Intro", paragraph "One", paragraph "Two"]
fn sample() -> DocTree {
    let mut tree = DocTree::new(NodeKind::Document {
        source: PathBuf::from("/src/index.md"),
    });
    let section = tree.push(DocTree::ROOT, NodeKind::Section);
    let title = tree.push(section, NodeKind::Title);
    tree.push(title, text("Intro"));
    for body in ["One", "Two"] {
        let p = tree.push(section, NodeKind::Paragraph);
        tree.push(p, text(body));
    }
    tree
}

#[test]
fn test_descendants_are_preorder() {
    let tree = sample();
    let kinds: Vec<_> = tree
        .descendants(DocTree::ROOT)
        .map(|id| tree.kind(id).clone())
        .collect();

    assert_eq!(kinds[0], NodeKind::Section);
    assert_eq!(kinds[1], NodeKind::Title);
    assert_eq!(kinds[2], text("Intro"));
    assert_eq!(kinds[3], NodeKind::Paragraph);
    assert_eq!(kinds[4], text("One"));
    assert_eq!(kinds.len(), tree.len() - 1, "Root is not its own descendant");
}

#[test]
fn test_nearest_ancestor_follows_parent_links() {
    let tree = sample();
    let intro = tree
        .find_all(|k| *k == NodeKind::Text("Intro".into()))
        .next()
        .unwrap();

    let section = tree.nearest_ancestor(intro, |k| matches!(k, NodeKind::Section));
    let document = tree.nearest_ancestor(intro, |k| matches!(k, NodeKind::Document { .. }));

    assert_eq!(section, Some(1));
    assert_eq!(document, Some(DocTree::ROOT));
    assert_eq!(
        tree.nearest_ancestor(DocTree::ROOT, |_| true),
        None,
        "The root has no ancestors"
    );
}

#[test]
fn test_is_ancestor_walks_parent_chain() {
    let tree = sample();

    assert!(tree.is_ancestor(1, 3), "Section holds the title text");
    assert!(tree.is_ancestor(DocTree::ROOT, 5));
    assert!(!tree.is_ancestor(4, 7), "Sibling paragraphs are unrelated");
    assert!(!tree.is_ancestor(3, 3), "A node is not its own ancestor");
    assert!(!tree.is_ancestor(3, 1));
}

#[test]
fn test_detached_tree_has_no_document_ancestor() {
    let mut tree = DocTree::new(NodeKind::Section);
    let title = tree.push(DocTree::ROOT, NodeKind::Title);

    assert_eq!(
        tree.nearest_ancestor(title, |k| matches!(k, NodeKind::Document { .. })),
        None
    );
}

#[test]
fn test_astext_joins_blocks_with_blank_lines() {
    let tree = sample();

    assert_eq!(tree.astext(1), "Intro\n\nOne\n\nTwo");
    assert_eq!(tree.astext(2), "Intro");
}

#[test]
fn test_first_child_ignores_grandchildren() {
    let tree = sample();

    assert_eq!(
        tree.first_child(DocTree::ROOT, |k| matches!(k, NodeKind::Paragraph)),
        None
    );
    assert!(tree
        .first_descendant(DocTree::ROOT, |k| matches!(k, NodeKind::Paragraph))
        .is_some());
}

#[test]
fn test_graft_keeps_shape_and_reparents_root() {
    let mut master = DocTree::new(NodeKind::Document {
        source: PathBuf::from("/src/index.md"),
    });
    let other = sample();
    let other_len = other.len();

    let grafted = master.graft(DocTree::ROOT, other);

    assert_eq!(master.len(), 1 + other_len);
    assert_eq!(master.parent(grafted), Some(DocTree::ROOT));
    assert_eq!(master.children(DocTree::ROOT), &[grafted]);
    assert_eq!(master.astext(grafted), "Intro\n\nOne\n\nTwo");

    let title = master
        .first_descendant(grafted, |k| matches!(k, NodeKind::Title))
        .unwrap();
    assert_eq!(
        master.nearest_ancestor(title, |k| matches!(k, NodeKind::Document { .. })),
        Some(grafted),
        "Nearest document is the grafted one, not the master"
    );
}
