use super::{Config, CONFIG_FILE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() {
    let dir = TempDir::new().unwrap();

    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.metadata_path, "metadata.json");
    assert_eq!(config.master_doc, "index");
    assert_eq!(config.file_extensions, vec!["md".to_string()]);
    assert_eq!(config.html_suffix, ".html");
    assert_eq!(config.metadata_file(dir.path()), dir.path().join("metadata.json"));
}

#[test]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "metadata_path = \"build/meta.json\"\nmaster_doc = \"contents\"\n",
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.metadata_path, "build/meta.json");
    assert_eq!(config.master_doc, "contents");
    assert_eq!(config.html_suffix, ".html", "Unset keys keep their default");
}

#[test]
fn test_absolute_metadata_path_is_kept() {
    let config = Config::parse("metadata_path = \"/var/meta.json\"", Path::new("x")).unwrap();

    assert_eq!(
        config.metadata_file(Path::new("/src")),
        Path::new("/var/meta.json")
    );
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "metadata_path = [unclosed").unwrap();

    assert!(Config::load(dir.path()).is_err());
}
