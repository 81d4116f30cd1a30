//! Metadata extraction from a resolved document tree.
//!
//! Every section and rubric that carries an anchor target becomes a
//! [`SectionRecord`]. Nodes without a target, or without a document that can
//! be named, are not link destinations and are passed over without comment.

use crate::doctree::{DocTree, NodeId};
use crate::node::NodeKind;
use crate::render::html_escape;
use crate::store::{MetadataStore, SectionRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Maps a source file to the logical name documents are known by.
pub trait DocNames {
    /// Docname for the file at `path`, or `None` when it is not a source document.
    fn path_to_doc(&self, path: &Path) -> Option<String>;
}

/// Walk `tree` and collect a record for every anchored section and rubric.
///
/// Sections are visited first and rubrics second, each in document order.
/// A later record with an identifier already in the store replaces the
/// earlier one.
pub fn extract_metadata(tree: &DocTree, docnames: &impl DocNames) -> MetadataStore {
    collect_records(tree, docnames).0
}

/// Extraction proper; also returns how many identifiers were declared twice.
///
/// An unlabelled node takes the identifier of the first target below it, so
/// it shares that identifier with the labelled descendant. The descendant's
/// record replaces the ancestor's without counting as a duplicate.
fn collect_records(tree: &DocTree, docnames: &impl DocNames) -> (MetadataStore, usize) {
    let mut store = MetadataStore::default();
    let mut owners: HashMap<String, NodeId> = HashMap::new();
    let mut duplicates = 0;

    let sections = tree.find_all(|k| matches!(k, NodeKind::Section));
    let rubrics = tree.find_all(|k| matches!(k, NodeKind::Rubric));

    for node in sections.chain(rubrics) {
        let Some(record) = section_record(tree, node, docnames) else {
            continue;
        };
        let docname = record.owning_document.clone();
        let owner = owners.insert(record.identifier.clone(), node);
        let Some(previous) = store.insert(record) else {
            continue;
        };
        if owner.is_some_and(|owner| !tree.is_ancestor(owner, node)) {
            duplicates += 1;
            warn!(
                identifier = %previous.identifier,
                previous = %previous.owning_document,
                current = %docname,
                "Duplicate section identifier, keeping the later record"
            );
        }
    }

    (store, duplicates)
}

/// Build the record for a single section or rubric node.
#[must_use]
pub fn section_record(
    tree: &DocTree,
    node: NodeId,
    docnames: &impl DocNames,
) -> Option<SectionRecord> {
    let target = tree.first_descendant(node, |k| matches!(k, NodeKind::Target { .. }))?;
    let NodeKind::Target { refid } = tree.kind(target) else {
        return None;
    };

    let (title, abstract_body) =
        match tree.first_descendant(node, |k| matches!(k, NodeKind::Abstract)) {
            Some(block) => (abstract_title(tree, block), tree.astext(block)),
            None => {
                let title = tree
                    .first_child(node, |k| matches!(k, NodeKind::Title))
                    .map(|t| tree.astext(t))
                    .unwrap_or_default();
                (title.clone(), title)
            }
        };

    let document = tree.nearest_ancestor(node, |k| matches!(k, NodeKind::Document { .. }))?;
    let NodeKind::Document { source } = tree.kind(document) else {
        return None;
    };
    let owning_document = docnames.path_to_doc(source)?;

    Some(SectionRecord {
        identifier: refid.clone(),
        title,
        abstract_body,
        owning_document,
    })
}

/// Title taken from the first paragraph of an abstract block.
///
/// A paragraph made of a single code span yields `<code>…</code>` with the
/// code escaped, which the HTML writer passes through as markup.
fn abstract_title(tree: &DocTree, block: NodeId) -> String {
    let Some(paragraph) = tree.first_child(block, |k| matches!(k, NodeKind::Paragraph)) else {
        return String::new();
    };
    match tree.children(paragraph) {
        [only] => match tree.kind(*only) {
            NodeKind::Literal(code) => format!("<code>{}</code>", html_escape(code)),
            _ => tree.astext(paragraph),
        },
        _ => tree.astext(paragraph),
    }
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;
