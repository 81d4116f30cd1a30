use super::{assemble_master, find_documents, read_document, SourceDir};
use crate::extract::DocNames;
use crate::formats::markdown::MarkdownFormat;
use crate::node::NodeKind;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("guide")).unwrap();
    fs::create_dir_all(root.join(".hidden")).unwrap();
    fs::write(root.join("index.md"), "# Home\n").unwrap();
    fs::write(root.join("guide/setup.md"), "# Setup\n").unwrap();
    fs::write(root.join("guide/notes.txt"), "not a source").unwrap();
    fs::write(root.join(".hidden/secret.md"), "# Secret\n").unwrap();
    dir
}

fn md() -> Vec<String> {
    vec!["md".to_string()]
}

#[test]
fn test_find_documents_filters_and_sorts() {
    let dir = project();

    let found = find_documents(dir.path(), &md()).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["guide/setup.md", "index.md"]);
}

#[test]
fn test_docnames() {
    let dir = project();
    let srcdir = SourceDir::new(dir.path(), &md()).unwrap();
    let root = srcdir.root().to_path_buf();

    assert_eq!(
        srcdir.path_to_doc(&root.join("guide/setup.md")),
        Some("guide/setup".to_string())
    );
    assert_eq!(srcdir.path_to_doc(&root.join("index.md")), Some("index".to_string()));
    assert_eq!(srcdir.path_to_doc(&root.join("guide/notes.txt")), None);
    assert_eq!(srcdir.path_to_doc(std::path::Path::new("/elsewhere/x.md")), None);
}

#[test]
fn test_missing_source_dir_is_an_error() {
    let dir = TempDir::new().unwrap();

    assert!(SourceDir::new(&dir.path().join("absent"), &md()).is_err());
}

#[test]
fn test_assemble_master_nests_documents() {
    let dir = project();
    let srcdir = SourceDir::new(dir.path(), &md()).unwrap();
    let root = srcdir.root();
    let master = read_document(&root.join("index.md"), "index", &MarkdownFormat).unwrap();
    let setup = read_document(&root.join("guide/setup.md"), "guide/setup", &MarkdownFormat).unwrap();

    let tree = assemble_master(master, vec![setup]);
    let documents: Vec<_> = tree
        .find_all(|k| matches!(k, NodeKind::Document { .. }))
        .collect();
    let sections = tree.find_all(|k| matches!(k, NodeKind::Section)).count();

    assert_eq!(documents.len(), 2);
    assert_eq!(tree.parent(documents[1]), Some(documents[0]));
    assert_eq!(sections, 2);
}
