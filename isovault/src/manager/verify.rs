//! Full-file checksum computation and comparison.
//!
//! Verification always hashes the complete file; there is no sampling or
//! size shortcut. Hex comparison ignores case, and expected values may
//! carry a `sha<nnn>:` algorithm prefix.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::{VaultError, VaultResult};

/// Buffer size for reading files during hashing (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

fn algorithm_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^sha\d+:").unwrap())
}

/// Compute the SHA-256 hash of a file.
///
/// The file is streamed in fixed-size chunks, so arbitrarily large images
/// hash in constant memory.
///
/// # Returns
///
/// The lowercase hex digest.
pub fn file_sha256(path: &Path) -> VaultResult<String> {
    let mut file = File::open(path).map_err(|e| VaultError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| VaultError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Strip a `sha<nnn>:` algorithm prefix from an expected checksum value.
pub fn strip_algorithm_prefix(expected: &str) -> &str {
    match algorithm_prefix().find(expected) {
        Some(found) => &expected[found.end()..],
        None => expected,
    }
}

/// Compare a file against an expected checksum value.
///
/// # Returns
///
/// Whether the file's SHA-256 hash matches, ignoring hex case.
///
/// # Errors
///
/// [`VaultError::ReadFailed`] when the file cannot be read.
pub fn verify_file(path: &Path, expected: &str) -> VaultResult<bool> {
    let actual = file_sha256(path)?;
    Ok(actual.eq_ignore_ascii_case(strip_algorithm_prefix(expected)))
}
