//! Node kinds that make up a document tree.
//!
//! The set is closed: only the kinds the metadata pipeline and the writers
//! inspect are represented. Anything else the reader meets is folded into the
//! nearest of these (text, literal blocks) rather than kept as an opaque node.

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
/// Tag and payload of a single tree node.
pub enum NodeKind {
    /// Root of one source document.
    Document {
        /// Absolute path of the file the document was read from.
        source: PathBuf,
    },
    /// Heading-delimited region that nests its content.
    Section,
    /// Heading-like marker that does not nest content.
    Rubric,
    /// Heading text of a section or rubric.
    Title,
    /// Block of inline content.
    Paragraph,
    /// Plain inline text.
    Text(String),
    /// Inline code span.
    Literal(String),
    /// Fenced or indented code block.
    LiteralBlock(String),
    /// Destination that links can refer to by identifier.
    Target {
        /// Identifier the destination is known by.
        refid: String,
    },
    /// Author-written summary nested inside a section.
    Abstract,
    /// Cross-reference placeholder filled in by the link resolver.
    Link(LinkReference),
}

impl NodeKind {
    #[must_use]
    /// Block containers separate their children's text with a blank line.
    pub fn is_block_container(&self) -> bool {
        matches!(self, Self::Document { .. } | Self::Section | Self::Abstract)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Unresolved cross-reference to a section identifier.
pub struct LinkReference {
    /// Identifier of the referenced section.
    pub target: String,
    /// Docname of the document containing the link.
    pub source_document: String,
    /// Display fields, set exactly once by the resolver.
    pub resolution: Option<LinkResolution>,
}

impl LinkReference {
    #[must_use]
    /// Create a link that has not been resolved yet.
    pub fn new(target: impl Into<String>, source_document: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source_document: source_document.into(),
            resolution: None,
        }
    }

    #[must_use]
    /// Text shown for the link: the resolved title, or the raw target before resolution.
    pub fn text(&self) -> &str {
        self.resolution
            .as_ref()
            .map_or(self.target.as_str(), |r| r.display_text.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Display fields written into a link once its target has been looked up.
pub struct LinkResolution {
    /// Visible link text.
    pub display_text: String,
    /// Tooltip shown on hover.
    pub tooltip_title: String,
    /// Relative URI to the target, including the `#identifier` fragment.
    pub resolved_uri: String,
    /// Docname the link points into.
    pub resolved_document: String,
}
