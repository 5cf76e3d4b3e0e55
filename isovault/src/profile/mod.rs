//! Installation profiles: layered storage and the operations over them.

mod manager;
mod store;

pub use manager::{ProfileManager, PROFILE_FIELDS};
pub use store::{ProfileStore, DEFAULT_PROFILE};
