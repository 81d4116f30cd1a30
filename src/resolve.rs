//! Link resolution: fills every link reference from the metadata store.
//!
//! A link whose target is known shows the target section's title and carries
//! its abstract as a tooltip. An unknown target is not an error: the link
//! falls back to its raw identifier, points at its own document and the miss
//! is reported.

use crate::doctree::DocTree;
use crate::node::{LinkResolution, NodeKind};
use crate::store::MetadataStore;
use tracing::warn;

/// Maps a docname to the URI the active output gives that document.
pub trait TargetUri {
    /// Output URI of `docname`, e.g. `guide/intro.html`.
    fn target_uri(&self, docname: &str) -> String;
}

#[derive(Debug, Default, PartialEq, Eq)]
/// Outcome of one resolution pass.
pub struct ResolveReport {
    /// Number of links filled from the store.
    pub resolved: usize,
    /// Targets that had no record, one entry per link, in tree order.
    pub missing: Vec<String>,
}

/// Fill the display fields of every unresolved link in `tree`.
///
/// Links already carrying a resolution are left as they are.
pub fn resolve_links(
    tree: &mut DocTree,
    store: &MetadataStore,
    uris: &impl TargetUri,
) -> ResolveReport {
    let links: Vec<_> = tree
        .find_all(|k| matches!(k, NodeKind::Link(link) if link.resolution.is_none()))
        .collect();
    let mut report = ResolveReport::default();

    for id in links {
        let NodeKind::Link(link) = tree.kind_mut(id) else {
            continue;
        };

        let resolution = match store.get(&link.target) {
            Some(record) => {
                report.resolved += 1;
                let base = uris.target_uri(&link.source_document);
                let to = uris.target_uri(&record.owning_document);
                LinkResolution {
                    display_text: record.title.clone(),
                    tooltip_title: record.abstract_body.clone(),
                    resolved_uri: format!("{}#{}", relative_uri(&base, &to), record.identifier),
                    resolved_document: record.owning_document.clone(),
                }
            }
            None => {
                warn!(
                    target = %link.target,
                    document = %link.source_document,
                    "Unknown link target"
                );
                report.missing.push(link.target.clone());
                LinkResolution {
                    display_text: link.target.clone(),
                    tooltip_title: String::new(),
                    resolved_uri: String::new(),
                    resolved_document: link.source_document.clone(),
                }
            }
        };

        link.resolution = Some(resolution);
    }

    report
}

#[must_use]
/// Relative URI leading from the page at `base` to the page at `to`.
///
/// Shared leading directories are dropped and each remaining directory of
/// `base` becomes a `../`. Identical pages give an empty string so a fragment
/// appended to the result stays on the current page.
pub fn relative_uri(base: &str, to: &str) -> String {
    if to.starts_with('/') {
        return to.to_string();
    }
    let base_parts: Vec<&str> = strip_fragment(base).split('/').collect();
    let to_parts: Vec<&str> = strip_fragment(to).split('/').collect();

    let common = base_parts[..base_parts.len() - 1]
        .iter()
        .zip(&to_parts[..to_parts.len() - 1])
        .take_while(|(a, b)| a == b)
        .count();
    let base_rest = &base_parts[common..];
    let to_rest = &to_parts[common..];

    if base_rest == to_rest {
        return String::new();
    }
    if base_rest.len() == 1 && to_rest == [""] {
        return "./".to_string();
    }
    format!("{}{}", "../".repeat(base_rest.len() - 1), to_rest.join("/"))
}

fn strip_fragment(uri: &str) -> &str {
    uri.split_once('#').map_or(uri, |(path, _)| path)
}

#[cfg(test)]
#[path = "tests/resolve.rs"]
mod tests;
