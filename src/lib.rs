//! precis: abstract-aware cross-references for Markdown documentation.
//!
//! A metadata build walks the assembled document tree and records, for every
//! anchored section and rubric, its identifier, title, abstract and owning
//! document. The records are written to a JSON file. Later builds read the
//! file back and fill each `{link}` role with the referenced section's title
//! as its text and its abstract as its tooltip.
#![allow(clippy::multiple_crate_versions)]

pub mod build;
pub mod config;
pub mod directives;
pub mod doctree;
pub mod error;
pub mod extract;
pub mod formats;
pub mod input;
pub mod node;
pub mod render;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
