//! Error type shared by the reader, the metadata store and the build glue.
//!
//! None of these errors abort a documentation build on their own: the build
//! hooks downgrade them to warnings. They exist so that callers outside the
//! hooks (tests, the CLI, other tooling) can still see what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading sources, loading configuration or moving
/// metadata across build phases.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the operation was attempted on.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Metadata could not be encoded or decoded as JSON.
    #[error("metadata JSON error in {path}: {source}")]
    Json {
        /// Metadata file being read or written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },

    /// `precis.toml` exists but is not valid.
    #[error("invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The tree-sitter grammar could not be loaded into a parser.
    #[error("tree-sitter language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A tree-sitter query failed to compile.
    #[error("tree-sitter query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// tree-sitter returned no tree for a source file.
    #[error("failed to parse {0}")]
    Parse(PathBuf),
}

impl Error {
    /// Wrap an I/O failure together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
