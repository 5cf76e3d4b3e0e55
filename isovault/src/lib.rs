//! isovault - Catalog-driven ISO downloads with checksum verification
//!
//! This library manages a catalog of installation images assembled from
//! layered YAML configuration: global drop-in fragments overridden by
//! project-local files. On top of the catalog it provides streaming HTTP
//! downloads with an explicit redirect bound, full-file SHA-256
//! verification, and installation profiles with default-profile
//! inheritance.
//!
//! The binary crate wires terminal implementations into the [`Output`] and
//! [`Interaction`] seams; everything else lives here and tests without a
//! terminal or network.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod profile;

pub use catalog::{CatalogEntry, CatalogStore};
pub use config::{Settings, VaultPaths};
pub use error::{VaultError, VaultResult};
pub use manager::{EntryStatus, Interaction, IsoManager, Output};
pub use profile::{ProfileManager, ProfileStore};
