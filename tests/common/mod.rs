// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// The listing used by the end-to-end scenarios: two classes under `Org.Foo`.
pub const SCENARIO_LISTING: &str = "Org.Foo.ClassA.Test1\nOrg.Foo.ClassA.Test2\nOrg.Foo.ClassB.Test1\n";

pub fn temp_workspace() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a raw listing file and returns its path.
pub fn write_listing(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write listing");
    path
}

/// Creates `lists/` inside the workspace and returns its path.
pub fn lists_dir(temp_dir: &TempDir) -> PathBuf {
    let dir = temp_dir.path().join("lists");
    fs::create_dir_all(&dir).expect("Failed to create lists directory");
    dir
}

/// Writes `<project>.tests.list` into `dir`.
pub fn write_list_file(dir: &PathBuf, project: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{project}.tests.list"));
    fs::write(&path, content).expect("Failed to write list file");
    path
}

/// Writes `<project>.tests.metadata.json` into `dir`.
pub fn write_metadata(dir: &PathBuf, project: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{project}.tests.metadata.json"));
    fs::write(&path, json).expect("Failed to write metadata");
    path
}

/// Helper function to create an invalid TOML configuration
pub fn create_invalid_toml(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("invalid.toml");
    let content = r#"
language = "en"
# Invalid TOML - missing closing bracket
[extractor
command = "tool"
"#;
    fs::write(&path, content).expect("Failed to write invalid config");
    path
}

/// Parses a written matrix file.
pub fn read_json(path: &PathBuf) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read JSON output");
    serde_json::from_str(&content).expect("Output is not valid JSON")
}
