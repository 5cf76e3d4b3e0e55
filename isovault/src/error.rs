//! Error types shared across the catalog, download, and verification layers.
//!
//! Operations split failures into two families. Expected outcomes of normal
//! use (a key the catalog does not have, a declined overwrite, a checksum
//! that does not match) are reported through the output seam and returned as
//! boolean results. `VaultError` covers the rest: filesystem trouble,
//! malformed input, and network transfers that cannot complete.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog and download operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors raised by catalog, download, and verification operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A URL could not be parsed or resolved.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL path does not end in a usable ISO filename.
    #[error("no .iso filename in URL: {url}")]
    InvalidFilename { url: String },

    /// The checksum input is neither a hex digest, a prefixed digest, nor a
    /// URL.
    #[error("checksum must be 64 hex characters, start with sha256:, or be a URL")]
    InvalidChecksumFormat { token: String },

    /// The checksum manifest has no line for the requested filename.
    #[error("could not find checksum for {filename} in checksum file")]
    ChecksumNotFound {
        filename: String,
        manifest_url: String,
    },

    /// A network transfer failed before or during the response body.
    #[error("failed to download {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// The server answered with a non-success, non-redirect status.
    #[error("HTTP error {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// A redirect chain exceeded the hop limit.
    #[error("too many redirects for {url} (limit {limit})")]
    TooManyRedirects { url: String, limit: usize },

    /// A catalog or profile fragment could not be serialized.
    #[error("failed to serialize '{key}': {reason}")]
    SerializeFailed { key: String, reason: String },
}

impl VaultError {
    /// Whether this error came from the network rather than local state.
    ///
    /// Bulk operations and the download flow treat network errors as
    /// per-entry outcomes instead of aborting the process.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::DownloadFailed { .. } | Self::HttpStatus { .. } | Self::TooManyRedirects { .. }
        )
    }
}
