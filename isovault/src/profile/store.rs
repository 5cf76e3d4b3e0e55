//! Layered profile storage with default-profile inheritance.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_yaml_ng::{Mapping, Value};
use tracing::{debug, warn};

use crate::config::{deep_merge, load_layered, write_fragment, VaultPaths};
use crate::error::VaultResult;

/// Name of the profile every other profile inherits from.
pub const DEFAULT_PROFILE: &str = "default";

/// Merged view of every profile layer, keyed by profile name.
///
/// Profiles stay free-form mappings rather than typed records: hand-edited
/// files may carry fields the interactive add flow does not know about, and
/// they must survive a round trip untouched.
pub struct ProfileStore {
    profiles: BTreeMap<String, Value>,
    fragment_dir: PathBuf,
}

impl ProfileStore {
    /// Load and merge all profile layers.
    pub fn load(paths: &VaultPaths) -> Self {
        let merged = load_layered(&paths.profile_fragment_dir(), &paths.project_profile_file());
        let profiles = named_profiles(merged);
        debug!(count = profiles.len(), "Loaded profiles");

        Self {
            profiles,
            fragment_dir: paths.profile_fragment_dir(),
        }
    }

    /// Sorted profile names across all layers.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Whether a profile with this exact name exists, ignoring inheritance.
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Whether any layer contributed a profile.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Resolve a profile with default-profile inheritance.
    ///
    /// The named profile's fields override the default's field by field.
    /// The `default` name, or an empty name, resolves to the default
    /// profile itself; an unknown name resolves to just the default fields,
    /// so callers decide whether an empty result is an error.
    pub fn resolve(&self, name: &str) -> Mapping {
        let default_profile = self.mapping(DEFAULT_PROFILE);
        if name == DEFAULT_PROFILE || name.is_empty() {
            return default_profile;
        }

        let named = self.mapping(name);
        match deep_merge(Value::Mapping(default_profile), Value::Mapping(named)) {
            Value::Mapping(merged) => merged,
            _ => Mapping::new(),
        }
    }

    /// Persist a profile as the drop-in fragment `<name>.yml`.
    ///
    /// # Returns
    ///
    /// The path of the written fragment.
    pub fn save(&self, name: &str, data: &Mapping) -> VaultResult<PathBuf> {
        write_fragment(&self.fragment_dir, name, &Value::Mapping(data.clone()))
    }

    fn mapping(&self, name: &str) -> Mapping {
        match self.profiles.get(name) {
            Some(Value::Mapping(mapping)) => mapping.clone(),
            _ => Mapping::new(),
        }
    }
}

/// Split the merged document into named profiles.
fn named_profiles(merged: Value) -> BTreeMap<String, Value> {
    let Value::Mapping(mapping) = merged else {
        return BTreeMap::new();
    };

    let mut profiles = BTreeMap::new();
    for (name, value) in mapping {
        let Value::String(name) = name else {
            warn!(name = ?name, "Skipping profile with non-string name");
            continue;
        };
        profiles.insert(name, value);
    }

    profiles
}
