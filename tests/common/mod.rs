/*!
 * Common test utilities for the stj-validator test suite
 */

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small valid STJ file for testing
pub fn create_test_stj(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(&minimal_document())?;
    create_test_file(dir, filename, &content)
}

/// A minimal valid document
pub fn minimal_document() -> Value {
    json!({"stj": {
        "version": "0.6.0",
        "transcript": {"segments": [{"text": "Hello world"}]}
    }})
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Load a JSON fixture from tests/resources
pub fn load_resource(relative_path: &str) -> Value {
    let content = fs::read_to_string(test_resource_path(relative_path))
        .unwrap_or_else(|e| panic!("Missing test resource {}: {}", relative_path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid JSON in test resource {}: {}", relative_path, e))
}

/// Route library logs to the test output; safe to call from every test
pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
