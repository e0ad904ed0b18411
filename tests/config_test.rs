// tests/config_test.rs
use release_notes::config::{load_config, Config};
use release_notes::{ErrorKind, ReleaseNotesError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert_eq!(config.changelog.base_branch, "main");
    assert_eq!(config.changelog.file_name, "body.txt");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[github]
api_url = "http://127.0.0.1:8080"

[changelog]
base_branch = "release"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.github.api_url, "http://127.0.0.1:8080");
    assert_eq!(config.github.web_url, "https://github.com");
    assert_eq!(config.changelog.base_branch, "release");
    assert_eq!(config.changelog.file_name, "body.txt");
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/releasenotes.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.github.web_url, "https://github.example.com");
    assert_eq!(config.github.per_page, 50);
    assert_eq!(config.changelog.base_branch, "trunk");
    assert_eq!(config.changelog.file_name, "RELEASE_BODY.md");
}

#[test]
fn test_explicit_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[changelog\nbase_branch = ").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(ReleaseNotesError::Config(_))));
}
