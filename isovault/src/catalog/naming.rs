//! Naming rules for catalog entries derived from a source URL.
//!
//! This module is the single source of truth for turning an image URL into
//! catalog metadata: the local filename, the catalog key, the display name,
//! and the architecture label.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use crate::error::{VaultError, VaultResult};

/// File extension an image URL must end in.
const ISO_EXTENSION: &str = ".iso";

/// Architecture labels paired with their filename patterns.
///
/// Order matters: `amd64` and `x86_64` must be tested before the bare `x86`
/// rule so 64-bit images are never classified as 32-bit. The `x86` rule is
/// word-bounded for the same reason.
const ARCHITECTURE_RULES: [(&str, &str); 7] = [
    ("amd64", r"(?i)amd64"),
    ("x86_64", r"(?i)x86[-_]?64"),
    ("arm64", r"(?i)arm64"),
    ("aarch64", r"(?i)aarch64"),
    ("i386", r"(?i)i386"),
    ("x86", r"(?i)\bx86\b"),
    ("armhf", r"(?i)armhf"),
];

/// Label reported when no architecture rule matches.
pub const UNKNOWN_ARCHITECTURE: &str = "unknown";

fn architecture_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ARCHITECTURE_RULES
            .iter()
            .map(|(label, pattern)| (*label, Regex::new(pattern).unwrap()))
            .collect()
    })
}

/// Extract the ISO filename from a source URL.
///
/// The candidate is the final path segment; query strings and fragments are
/// not part of it.
///
/// # Examples
///
/// ```
/// use isovault::catalog::iso_filename;
///
/// let filename =
///     iso_filename("https://example.com/images/debian-12.5.0-amd64-netinst.iso").unwrap();
/// assert_eq!(filename, "debian-12.5.0-amd64-netinst.iso");
///
/// assert!(iso_filename("https://example.com/images/SHA256SUMS").is_err());
/// ```
///
/// # Errors
///
/// [`VaultError::InvalidUrl`] when the URL does not parse,
/// [`VaultError::InvalidFilename`] when the final segment does not end in
/// `.iso`.
pub fn iso_filename(url: &str) -> VaultResult<String> {
    let parsed = Url::parse(url).map_err(|e| VaultError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let candidate = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    if candidate.ends_with(ISO_EXTENSION) {
        Ok(candidate.to_string())
    } else {
        Err(VaultError::InvalidFilename {
            url: url.to_string(),
        })
    }
}

/// Catalog key for an ISO filename: the filename without its extension.
///
/// # Examples
///
/// ```
/// use isovault::catalog::catalog_key;
///
/// assert_eq!(
///     catalog_key("debian-12.5.0-amd64-netinst.iso"),
///     "debian-12.5.0-amd64-netinst"
/// );
/// ```
pub fn catalog_key(filename: &str) -> String {
    filename
        .strip_suffix(ISO_EXTENSION)
        .unwrap_or(filename)
        .to_string()
}

/// Human-readable display name for an ISO filename.
///
/// Strips the extension, turns `-` and `_` into spaces, and capitalizes
/// each word.
///
/// # Examples
///
/// ```
/// use isovault::catalog::display_name;
///
/// assert_eq!(
///     display_name("debian-12.5.0-amd64-netinst.iso"),
///     "Debian 12.5.0 Amd64 Netinst"
/// );
/// assert_eq!(display_name("ubuntu_22.04_LIVE.iso"), "Ubuntu 22.04 Live");
/// ```
pub fn display_name(filename: &str) -> String {
    let stem = filename.strip_suffix(ISO_EXTENSION).unwrap_or(filename);

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify the architecture of an image from its filename.
///
/// Rules run in a fixed priority order with first match winning; no match
/// yields [`UNKNOWN_ARCHITECTURE`].
///
/// # Examples
///
/// ```
/// use isovault::catalog::detect_architecture;
///
/// assert_eq!(detect_architecture("ubuntu-22.04-x86_64.iso"), "x86_64");
/// assert_eq!(detect_architecture("debian-12.5.0-amd64-netinst.iso"), "amd64");
/// assert_eq!(detect_architecture("alpine-virt-3.19.1.iso"), "unknown");
/// ```
pub fn detect_architecture(filename: &str) -> &'static str {
    architecture_patterns()
        .iter()
        .find(|(_, pattern)| pattern.is_match(filename))
        .map(|(label, _)| *label)
        .unwrap_or(UNKNOWN_ARCHITECTURE)
}

/// Uppercase the first character of a word, lowercasing the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
