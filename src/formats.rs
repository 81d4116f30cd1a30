//! Format trait and implementations for different source document types.
//!
//! A format names the tree-sitter grammars used to parse its sources and
//! turns one source file into a [`DocTree`](crate::doctree::DocTree) that the
//! metadata pipeline can walk.

pub mod markdown;

use crate::doctree::DocTree;
use crate::error::Result;
use std::path::Path;

/// Source format that can be read into a document tree.
pub trait Format {
    /// Grammar for block structure.
    fn language(&self) -> tree_sitter::Language;
    /// Grammar for the inline content of paragraphs and headings.
    fn inline_language(&self) -> tree_sitter::Language;
    /// Query over the inline grammar capturing `@literal` spans and `@delimiter` markup.
    fn inline_query(&self) -> &str;
    /// Parse `source`, read from `path`, into a tree rooted at a document node.
    ///
    /// `docname` is recorded on every link so the resolver knows where the
    /// link lives.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammars cannot be loaded or parsing fails.
    fn read(&self, source: &str, path: &Path, docname: &str) -> Result<DocTree>;
}
