//! Source discovery and document loading.
//!
//! Sources are found by walking the source directory for matching file
//! extensions. Each file is known by its docname: the path relative to the
//! source directory, without extension, with `/` separators.

use crate::doctree::DocTree;
use crate::error::{Error, Result};
use crate::extract::DocNames;
use crate::formats::Format;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug)]
/// Root directory of a documentation project.
pub struct SourceDir {
    root: PathBuf,
    extensions: Vec<String>,
}

impl SourceDir {
    /// Open `root` as a source directory holding files with `extensions`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist.
    pub fn new(root: &Path, extensions: &[String]) -> Result<Self> {
        let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
        Ok(Self {
            root,
            extensions: extensions.to_vec(),
        })
    }

    #[must_use]
    /// Absolute path of the source directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All source files below the root, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        find_documents(&self.root, &self.extensions)
    }
}

impl DocNames for SourceDir {
    fn path_to_doc(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let ext = relative.extension()?.to_str()?;
        if !self.extensions.iter().any(|e| e == ext) {
            return None;
        }

        let stem = relative.with_extension("");
        let parts = stem
            .components()
            .map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(parts.join("/"))
    }
}

/// Recursively collect files below `root` whose extension is in `extensions`.
///
/// Hidden files and directories are skipped. The result is sorted.
///
/// # Errors
///
/// Returns an error if a directory cannot be listed.
pub fn find_documents(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&dir, e))?.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if hidden {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.iter().any(|x| x == e))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Read and parse one source file into a document tree.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_document(path: &Path, docname: &str, format: &impl Format) -> Result<DocTree> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    debug!(docname, path = %path.display(), "Reading document");
    format.read(&source, path, docname)
}

#[must_use]
/// Merge documents into one aggregate tree rooted at the master document.
///
/// Each of `others` keeps its own document root, nested directly under the
/// master's, so every section still knows which file it came from.
pub fn assemble_master(master: DocTree, others: Vec<DocTree>) -> DocTree {
    let mut tree = master;
    for doc in others {
        tree.graft(DocTree::ROOT, doc);
    }
    tree
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
