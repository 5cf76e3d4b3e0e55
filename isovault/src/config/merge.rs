//! Recursive merging of layered YAML documents.
//!
//! Catalog entries, runtime settings, and profiles are all assembled from
//! multiple documents: drop-in fragments first, a project-local file last.
//! [`deep_merge`] combines two such documents with "overlay wins" semantics,
//! with one twist: an explicit null in the overlay keeps the base value
//! instead of erasing it, so a later layer can override a single field of a
//! nested mapping without restating the rest.

use serde_yaml_ng::Value;

/// Merge `overlay` onto `base`, producing a new value.
///
/// Rules, applied per key of a mapping:
/// - a key present on only one side is taken as-is;
/// - an overlay value of null keeps the base value;
/// - two mapping values merge recursively;
/// - anything else: the overlay value replaces the base value.
///
/// Non-mapping inputs follow the same precedence: the overlay wins unless it
/// is null. The merge is a pure per-key operation with no dependence on key
/// iteration order.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Mapping(mut merged), Value::Mapping(overlay)) => {
            for (key, overlay_value) in overlay {
                match merged.remove(&key) {
                    Some(base_value) => {
                        merged.insert(key, deep_merge(base_value, overlay_value));
                    }
                    None => {
                        merged.insert(key, overlay_value);
                    }
                }
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay,
    }
}
