//! The metadata store carries section records from one build phase to the next.
//!
//! Phases do not share memory, so the store is written out as a single JSON
//! object keyed by section identifier and read back wholesale by the phase
//! that renders links.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Title, abstract and location of one linkable section.
pub struct SectionRecord {
    /// Anchor identifier; serialised as the record's key rather than a field.
    #[serde(skip)]
    pub identifier: String,
    /// Heading text, or the first paragraph of the section's abstract.
    pub title: String,
    /// Full abstract text, or the heading text when there is no abstract.
    #[serde(rename = "abstract")]
    pub abstract_body: String,
    /// Docname of the document holding the section.
    #[serde(rename = "docname")]
    pub owning_document: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Section records keyed by identifier.
pub struct MetadataStore {
    records: HashMap<String, SectionRecord>,
}

impl MetadataStore {
    /// Add a record, returning the one it replaced if the identifier was taken.
    pub fn insert(&mut self, record: SectionRecord) -> Option<SectionRecord> {
        self.records.insert(record.identifier.clone(), record)
    }

    #[must_use]
    /// Record for `identifier`, if extracted.
    pub fn get(&self, identifier: &str) -> Option<&SectionRecord> {
        self.records.get(identifier)
    }

    #[must_use]
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    /// Whether no record has been extracted or loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionRecord> {
        self.records.values()
    }

    /// Serialise the store as pretty JSON to `path`.
    ///
    /// Keys are written in sorted order so unchanged sources give an
    /// unchanged file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let sorted: BTreeMap<&str, &SectionRecord> = self
            .records
            .iter()
            .map(|(id, record)| (id.as_str(), record))
            .collect();
        let json = serde_json::to_string_pretty(&sorted).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), records = self.len(), "Wrote metadata");
        Ok(())
    }

    /// Read a store previously written by [`save`](Self::save).
    ///
    /// Unknown fields inside records are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not the expected JSON shape.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let raw: HashMap<String, SectionRecord> =
            serde_json::from_str(&contents).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let records = raw
            .into_iter()
            .map(|(identifier, mut record)| {
                record.identifier.clone_from(&identifier);
                (identifier, record)
            })
            .collect();
        Ok(Self { records })
    }

    #[must_use]
    /// Like [`load`](Self::load), but any failure gives an empty store and a warning.
    ///
    /// Links resolved against the empty store degrade to showing their raw
    /// target, which keeps the build going.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => {
                debug!(path = %path.display(), records = store.len(), "Loaded metadata");
                store
            }
            Err(e) => {
                warn!("No metadata available, links will show their targets: {e}");
                Self::default()
            }
        }
    }
}

impl FromIterator<SectionRecord> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = SectionRecord>>(iter: I) -> Self {
        let mut store = Self::default();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
