//! Manifest parsing and key lookup.
//!
//! Manifests are not deserialized into a fixed schema. Instead, the scanner
//! parses them into a [`serde_json::Value`] tree and looks up the `name` and
//! `version` keys wherever they appear. Object keys keep their document order
//! (`serde_json` is built with `preserve_order`), which decides which match
//! counts as the first.

use crate::error::{ScanError, ScanOutcome};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const NAME_KEY: &str = "name";
pub const VERSION_KEY: &str = "version";

/// Reads and parses a manifest file.
///
/// The file must be valid UTF-8 JSON. The file handle is closed before
/// parsing starts.
pub fn read_manifest(path: &Path) -> ScanOutcome<Value> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ScanError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Collects every value stored under `key`, anywhere in the document.
///
/// Matches are returned in depth-first order, visiting object entries in
/// document order. A matching entry whose value is itself an object or an
/// array is still searched, so nested matches follow their parent.
///
/// # Example
///
/// ```
/// use crxlist::manifest::find_key;
/// use serde_json::json;
///
/// let doc = json!({"name": "Outer", "action": {"name": "Inner"}});
/// let names = find_key(&doc, "name");
/// assert_eq!(names, vec![&json!("Outer"), &json!("Inner")]);
/// ```
pub fn find_key<'a>(doc: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut results = Vec::new();
    collect_key(doc, key, &mut results);
    results
}

fn collect_key<'a>(item: &'a Value, key: &str, results: &mut Vec<&'a Value>) {
    match item {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    results.push(v);
                }
                if v.is_object() || v.is_array() {
                    collect_key(v, key, results);
                }
            }
        }
        Value::Array(items) => {
            for element in items {
                collect_key(element, key, results);
            }
        }
        _ => {}
    }
}

/// Renders a manifest value as record text.
///
/// Strings are used as-is; anything else becomes compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns the first `name` and first `version` of a manifest, if both exist.
pub fn name_and_version(doc: &Value) -> Option<(String, String)> {
    let name = find_key(doc, NAME_KEY).into_iter().next()?;
    let version = find_key(doc, VERSION_KEY).into_iter().next()?;
    Some((value_text(name), value_text(version)))
}
