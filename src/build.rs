//! Build lifecycle: the two hooks a build drives and the loop that drives them.
//!
//! A build targets one output format. The metadata build extracts section
//! records from the assembled master tree and writes them out when the build
//! finishes. Every other build reads those records back and resolves the
//! links of each document before writing it. No build does both.

use crate::config::Config;
use crate::doctree::DocTree;
use crate::error::{Error, Result};
use crate::extract::{extract_metadata, DocNames};
use crate::formats::markdown::MarkdownFormat;
use crate::input::{self, SourceDir};
use crate::node::NodeKind;
use crate::render::{self, OutputFormat};
use crate::resolve::{resolve_links, ResolveReport, TargetUri};
use crate::store::MetadataStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, PartialEq, Eq)]
/// What [`BuildContext::on_doctree_resolved`] did with a tree.
pub enum Dispatch {
    /// Metadata was extracted; holds the number of records.
    Extracted(usize),
    /// Links were resolved.
    Resolved(ResolveReport),
}

/// Page URIs of the documents in one output format.
pub struct PageUris<'a> {
    format: OutputFormat,
    html_suffix: &'a str,
}

impl TargetUri for PageUris<'_> {
    fn target_uri(&self, docname: &str) -> String {
        match self.format {
            OutputFormat::Html => format!("{docname}{}", self.html_suffix),
            OutputFormat::Text => format!("{docname}.txt"),
            OutputFormat::Latex | OutputFormat::Meta => docname.to_string(),
        }
    }
}

/// State owned by one build invocation.
pub struct BuildContext<N> {
    format: OutputFormat,
    metadata_path: PathBuf,
    html_suffix: String,
    docnames: N,
    /// Records extracted by this build, written out at the end.
    extracted: Option<MetadataStore>,
    /// Records read from the metadata file, loaded on first use.
    loaded: Option<MetadataStore>,
}

impl<N: DocNames> BuildContext<N> {
    /// Start a build producing `format`, exchanging metadata through `metadata_path`.
    pub fn new(
        format: OutputFormat,
        metadata_path: impl Into<PathBuf>,
        html_suffix: impl Into<String>,
        docnames: N,
    ) -> Self {
        Self {
            format,
            metadata_path: metadata_path.into(),
            html_suffix: html_suffix.into(),
            docnames,
            extracted: None,
            loaded: None,
        }
    }

    #[must_use]
    /// Output format of this build.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    /// Records extracted by this build, if it is a metadata build that has run.
    pub fn metadata(&self) -> Option<&MetadataStore> {
        self.extracted.as_ref()
    }

    #[must_use]
    /// URIs the current output format gives documents.
    pub fn page_uris(&self) -> PageUris<'_> {
        PageUris {
            format: self.format,
            html_suffix: &self.html_suffix,
        }
    }

    /// Hook run once a document tree is fully resolved.
    ///
    /// The metadata build extracts records from `tree` and keeps them on the
    /// context. Other builds resolve the links in `tree` against the metadata
    /// file, which is read on the first call. A missing or unreadable file
    /// means every link takes the fallback path.
    pub fn on_doctree_resolved(&mut self, tree: &mut DocTree, docname: &str) -> Dispatch {
        if self.format == OutputFormat::Meta {
            info!(docname, "Loading metadata from doctree");
            let store = extract_metadata(tree, &self.docnames);
            let records = store.len();
            self.extracted = Some(store);
            return Dispatch::Extracted(records);
        }

        let path = &self.metadata_path;
        let store = self
            .loaded
            .get_or_insert_with(|| MetadataStore::load_or_empty(path));
        let uris = PageUris {
            format: self.format,
            html_suffix: &self.html_suffix,
        };
        Dispatch::Resolved(resolve_links(tree, store, &uris))
    }

    /// Hook run once at the very end of a build.
    ///
    /// Writes the extracted records, if any. A failed write is reported and
    /// otherwise ignored: later builds will simply find no metadata.
    pub fn on_build_finished(&mut self) {
        let Some(store) = &self.extracted else {
            return;
        };
        match store.save(&self.metadata_path) {
            Ok(()) => info!(
                path = %self.metadata_path.display(),
                records = store.len(),
                "Metadata written"
            ),
            Err(e) => warn!(
                "Unable to write metadata to {}: {e}",
                self.metadata_path.display()
            ),
        }
    }
}

#[derive(Clone, Debug)]
/// Inputs of a command-line build.
pub struct BuildOptions {
    /// Source directory.
    pub srcdir: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Output directory; defaults to `_build/<format>` in the source directory.
    pub outdir: Option<PathBuf>,
    /// Metadata file overriding the configured one.
    pub metadata: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Eq)]
/// Counts reported at the end of a build.
pub struct BuildSummary {
    /// Documents read.
    pub documents: usize,
    /// Section records extracted (metadata builds only).
    pub records: usize,
    /// Links resolved from metadata.
    pub resolved_links: usize,
    /// Links whose target had no metadata.
    pub missing_links: usize,
    /// Files written to the output directory.
    pub written: Vec<PathBuf>,
}

/// Run a complete build of the project in `options.srcdir`.
///
/// Unreadable individual documents are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the source directory
/// cannot be listed, or an output file cannot be written.
pub fn run(options: &BuildOptions) -> Result<BuildSummary> {
    let config = Config::load(&options.srcdir)?;
    let srcdir = SourceDir::new(&options.srcdir, &config.file_extensions)?;
    let metadata_path = options
        .metadata
        .clone()
        .unwrap_or_else(|| config.metadata_file(srcdir.root()));
    let outdir = options.outdir.clone().unwrap_or_else(|| {
        srcdir.root().join("_build").join(options.format.name())
    });

    info!("Preparing documents");
    let documents: Vec<(String, PathBuf)> = srcdir
        .documents()?
        .into_iter()
        .filter_map(|path| srcdir.path_to_doc(&path).map(|docname| (docname, path)))
        .collect();

    let mut ctx = BuildContext::new(
        options.format,
        metadata_path,
        config.html_suffix.clone(),
        srcdir.clone(),
    );
    let mut summary = BuildSummary {
        documents: documents.len(),
        ..BuildSummary::default()
    };

    if options.format == OutputFormat::Meta {
        info!(master = %config.master_doc, "Compiling master document");
        let mut master = None;
        let mut others = Vec::new();
        for (docname, path) in &documents {
            let Some(tree) = read_or_warn(path, docname) else {
                continue;
            };
            if *docname == config.master_doc {
                master = Some(tree);
            } else {
                others.push(tree);
            }
        }
        let master = master.unwrap_or_else(|| {
            DocTree::new(NodeKind::Document {
                source: srcdir.root().join(&config.master_doc),
            })
        });
        let mut tree = input::assemble_master(master, others);
        let dispatch = ctx.on_doctree_resolved(&mut tree, &config.master_doc);
        if let Dispatch::Extracted(records) = dispatch {
            summary.records = records;
        }
    } else {
        for (docname, path) in &documents {
            let Some(mut tree) = read_or_warn(path, docname) else {
                continue;
            };
            if let Dispatch::Resolved(report) = ctx.on_doctree_resolved(&mut tree, docname) {
                summary.resolved_links += report.resolved;
                summary.missing_links += report.missing.len();
            }
            if let Some(written) = write_output(&tree, options.format, &outdir, docname)? {
                summary.written.push(written);
            }
        }
    }

    ctx.on_build_finished();
    Ok(summary)
}

fn read_or_warn(path: &Path, docname: &str) -> Option<DocTree> {
    match input::read_document(path, docname, &MarkdownFormat) {
        Ok(tree) => Some(tree),
        Err(e) => {
            warn!("Skipping {docname}: {e}");
            None
        }
    }
}

fn write_output(
    tree: &DocTree,
    format: OutputFormat,
    outdir: &Path,
    docname: &str,
) -> Result<Option<PathBuf>> {
    let (Some(body), Some(ext)) = (render::write(tree, format), format.extension()) else {
        return Ok(None);
    };
    let path = outdir.join(format!("{docname}.{ext}"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(&path, body).map_err(|e| Error::io(&path, e))?;
    Ok(Some(path))
}

#[cfg(test)]
#[path = "tests/build.rs"]
mod tests;
