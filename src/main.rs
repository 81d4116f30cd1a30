//! precis: build Markdown documentation with abstract-aware cross-references.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand, ValueEnum};
use precis::build::{self, BuildOptions};
use precis::render::OutputFormat;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "precis")]
#[command(about = "Abstract-aware cross-references for Markdown documentation", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log per-document detail
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build a documentation project
    Build {
        /// Source directory
        #[arg(value_name = "SRCDIR", default_value = ".")]
        srcdir: PathBuf,

        /// Output to produce; `meta` collects section metadata for later builds
        #[arg(long, short = 'b', value_enum, default_value_t = Target::Html)]
        builder: Target,

        /// Output directory
        #[arg(long, short = 'o', value_name = "DIR")]
        outdir: Option<PathBuf>,

        /// Metadata file, overriding `metadata_path` from precis.toml
        #[arg(long, value_name = "PATH")]
        metadata: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Html,
    Latex,
    Text,
    Meta,
}

impl From<Target> for OutputFormat {
    fn from(target: Target) -> Self {
        match target {
            Target::Html => Self::Html,
            Target::Latex => Self::Latex,
            Target::Text => Self::Text,
            Target::Meta => Self::Meta,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .init();

    match args.command {
        Command::Build {
            srcdir,
            builder,
            outdir,
            metadata,
        } => {
            let options = BuildOptions {
                srcdir,
                format: builder.into(),
                outdir,
                metadata,
            };
            let summary = build::run(&options)?;
            info!(
                documents = summary.documents,
                records = summary.records,
                resolved = summary.resolved_links,
                missing = summary.missing_links,
                written = summary.written.len(),
                "Build finished"
            );
        }
    }

    Ok(())
}
