//! Layered configuration: locations, document loading, merging, settings.
//!
//! Catalogs, profiles, and runtime settings all come from the same layered
//! YAML scheme. Global drop-in fragments merge first, a project-local file
//! merges last, and deeper layers override shallower ones field by field.

mod document;
mod merge;
mod paths;
mod settings;

pub use document::{load_document, load_layered, write_fragment};
pub use merge::deep_merge;
pub use paths::VaultPaths;
pub use settings::Settings;
