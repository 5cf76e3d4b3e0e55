//! The ISO catalog: entry records, naming rules, and layered storage.

mod entry;
mod naming;
mod store;

pub use entry::CatalogEntry;
pub use naming::{
    catalog_key, detect_architecture, display_name, iso_filename, UNKNOWN_ARCHITECTURE,
};
pub use store::CatalogStore;
