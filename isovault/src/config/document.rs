//! Loading and writing the YAML documents that make up a configuration.
//!
//! Every layered store is assembled the same way: drop-in fragments from a
//! `*.d` directory in lexicographic filename order, then a project-local
//! file as the final overriding layer. Unreadable or malformed documents are
//! skipped with a warning so one bad file never hides the others.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;
use tracing::{debug, warn};

use crate::error::{VaultError, VaultResult};

/// Extension a drop-in fragment must carry to be picked up.
const FRAGMENT_EXTENSION: &str = "yml";

/// Load a single YAML document, tolerating absence and damage.
///
/// A missing file yields [`Value::Null`]; read and parse failures are logged
/// and also yield `Null`, which the merge treats as "no contribution".
pub fn load_document(path: &Path) -> Value {
    if !path.exists() {
        return Value::Null;
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Skipping unreadable configuration file");
            return Value::Null;
        }
    };

    match serde_yaml_ng::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Skipping malformed configuration file");
            Value::Null
        }
    }
}

/// Load and merge one configuration family.
///
/// Fragments named `*.yml` under `fragment_dir` merge in lexicographic
/// filename order, then `project_file` merges last so a project can override
/// any earlier layer. Either source may be absent.
pub fn load_layered(fragment_dir: &Path, project_file: &Path) -> Value {
    let mut merged = Value::Null;

    for path in fragment_paths(fragment_dir) {
        debug!(path = %path.display(), "Loading configuration fragment");
        merged = super::deep_merge(merged, load_document(&path));
    }

    super::deep_merge(merged, load_document(project_file))
}

/// Write a single-binding fragment `<key>.yml` into `dir`.
///
/// The document maps `key` to `value`, matching the shape hand-edited
/// fragments use. The directory is created when missing.
///
/// # Returns
///
/// The path of the written fragment.
pub fn write_fragment(dir: &Path, key: &str, value: &Value) -> VaultResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| VaultError::CreateDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut document = serde_yaml_ng::Mapping::new();
    document.insert(Value::String(key.to_string()), value.clone());

    let text = serde_yaml_ng::to_string(&document).map_err(|e| VaultError::SerializeFailed {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    let path = dir.join(format!("{}.{}", key, FRAGMENT_EXTENSION));
    fs::write(&path, text).map_err(|e| VaultError::WriteFailed {
        path: path.clone(),
        source: e,
    })?;

    debug!(path = %path.display(), "Wrote configuration fragment");
    Ok(path)
}

/// Sorted `*.yml` paths under a fragment directory.
///
/// An absent or unreadable directory contributes nothing.
fn fragment_paths(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == FRAGMENT_EXTENSION))
        .collect();

    paths.sort();
    paths
}
