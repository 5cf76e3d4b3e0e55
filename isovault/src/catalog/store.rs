//! Layered catalog loading and persistence.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_yaml_ng::Value;
use tracing::{debug, warn};

use crate::config::{load_layered, write_fragment, VaultPaths};
use crate::error::{VaultError, VaultResult};

use super::entry::CatalogEntry;

/// Merged view of every catalog layer, keyed by catalog key.
///
/// Fragments under `isos.d/` merge in filename order, then the project-local
/// `isos.yml` overrides as the final layer. The view is read-mostly:
/// [`CatalogStore::save`] writes a new fragment but does not refresh the
/// in-memory mapping; a fresh load sees the addition.
pub struct CatalogStore {
    entries: BTreeMap<String, CatalogEntry>,
    fragment_dir: PathBuf,
}

impl CatalogStore {
    /// Load and merge all catalog layers.
    pub fn load(paths: &VaultPaths) -> Self {
        let merged = load_layered(&paths.catalog_fragment_dir(), &paths.project_catalog_file());
        let entries = typed_entries(merged);
        debug!(count = entries.len(), "Loaded catalog");

        Self {
            entries,
            fragment_dir: paths.catalog_fragment_dir(),
        }
    }

    /// The merged entries in key order.
    pub fn entries(&self) -> &BTreeMap<String, CatalogEntry> {
        &self.entries
    }

    /// Look up one entry by catalog key.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Whether any layer contributed an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist an entry as the drop-in fragment `<key>.yml`.
    ///
    /// Other layers are not consulted: if the key already exists elsewhere,
    /// effective precedence on the next load follows the usual layer order.
    ///
    /// # Returns
    ///
    /// The path of the written fragment.
    pub fn save(&self, key: &str, entry: &CatalogEntry) -> VaultResult<PathBuf> {
        let value = serde_yaml_ng::to_value(entry).map_err(|e| VaultError::SerializeFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        write_fragment(&self.fragment_dir, key, &value)
    }
}

/// Convert the merged document into typed entries.
///
/// Bindings that do not deserialize (missing `url`, wrong shapes) are
/// skipped with a warning so one bad binding cannot hide the rest of the
/// catalog.
fn typed_entries(merged: Value) -> BTreeMap<String, CatalogEntry> {
    let Value::Mapping(mapping) = merged else {
        return BTreeMap::new();
    };

    let mut entries = BTreeMap::new();
    for (key, value) in mapping {
        let Value::String(key) = key else {
            warn!(key = ?key, "Skipping catalog entry with non-string key");
            continue;
        };

        match serde_yaml_ng::from_value::<CatalogEntry>(value) {
            Ok(entry) => {
                entries.insert(key, entry);
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Skipping malformed catalog entry");
            }
        }
    }

    entries
}
