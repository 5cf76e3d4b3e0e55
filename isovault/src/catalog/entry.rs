//! Catalog entry records.

use serde::{Deserialize, Serialize};

/// One downloadable image tracked by the catalog.
///
/// Entries come from hand-edited configuration layers or the interactive
/// add flow, so everything except the source URL is optional. Unknown
/// fields in a layer are ignored rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, e.g. "Debian 12.5.0 Amd64 Netinst".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source URL the image is downloaded from.
    pub url: String,

    /// Expected content hash, normally `sha256:<64 hex>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    /// Where the checksum came from. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_url: Option<String>,

    /// Local file name. `<key>.iso` applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Detected or declared architecture label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
}

impl CatalogEntry {
    /// Local file name for this entry under the image directory.
    pub fn local_filename(&self, key: &str) -> String {
        match &self.filename {
            Some(filename) => filename.clone(),
            None => format!("{}.iso", key),
        }
    }
}
