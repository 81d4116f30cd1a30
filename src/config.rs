//! Build configuration read from a `precis.toml` in the source directory.
//!
//! Every setting has a default, so a project without the file builds as if
//! it contained an empty one.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the source directory.
pub const CONFIG_FILE: &str = "precis.toml";

#[derive(Facet, Clone, Debug)]
/// Project settings loaded from `precis.toml` or falling back to defaults.
pub struct Config {
    #[facet(default = "metadata.json".to_string())]
    /// Where the metadata build writes section records and other builds read them.
    /// Relative paths are taken from the source directory.
    pub metadata_path: String,
    #[facet(default = "index".to_string())]
    /// Docname of the document other documents are assembled under.
    pub master_doc: String,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes treated as source documents.
    pub file_extensions: Vec<String>,
    #[facet(default = ".html".to_string())]
    /// Suffix HTML pages are published with, used when computing link URIs.
    pub html_suffix: String,
}

impl Config {
    /// Load `precis.toml` from `srcdir`, or the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(srcdir: &Path) -> Result<Self> {
        let path = srcdir.join(CONFIG_FILE);
        let contents = if path.is_file() {
            fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?
        } else {
            String::new()
        };
        Self::parse(&contents, &path)
    }

    /// Parse configuration text; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if `contents` is not a valid configuration.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Metadata file location with relative paths anchored at `srcdir`.
    pub fn metadata_file(&self, srcdir: &Path) -> PathBuf {
        srcdir.join(&self.metadata_path)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
