//! Shared utilities for integration testing.

use std::io::Write;

use tempfile::{Builder, NamedTempFile};

/// Write a configuration document to a temp file with the given extension.
pub fn write_config(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("switcher-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A JSON document with the given log level and rules.
pub fn json_document(log_level: &str, rules: &[serde_json::Value]) -> String {
    serde_json::json!({
        "log_level": log_level,
        "rules": rules,
    })
    .to_string()
}
