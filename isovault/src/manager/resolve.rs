//! Derivation of a catalog entry from a URL and checksum input.
//!
//! The checksum input is one of, tested in this order: a manifest URL to
//! fetch and scan, a bare 64-hex digest, or an explicitly `sha256:` prefixed
//! digest. Anything else is rejected.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{detect_architecture, display_name, iso_filename, CatalogEntry};
use crate::error::{VaultError, VaultResult};

use super::download::HttpFetcher;
use super::traits::Output;

fn hex64_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{64}$").unwrap())
}

/// Derive a fully populated catalog entry candidate.
///
/// Progress lines for the interactive add flow go through `output`; nothing
/// is persisted here.
///
/// # Errors
///
/// Filename errors from [`iso_filename`], [`VaultError::ChecksumNotFound`]
/// when a manifest has no line for the image, network errors when a
/// manifest cannot be fetched, and [`VaultError::InvalidChecksumFormat`]
/// when the checksum input fits no accepted shape.
pub fn derive_entry(
    fetcher: &HttpFetcher,
    url: &str,
    checksum_input: &str,
    output: &dyn Output,
) -> VaultResult<CatalogEntry> {
    let filename = iso_filename(url)?;
    output.line(&format!("  OK Extracted filename: {}", filename));

    let architecture = detect_architecture(&filename);
    output.line(&format!("  OK Detected architecture: {}", architecture));

    let (checksum, checksum_url) = resolve_checksum(fetcher, checksum_input, &filename, output)?;

    Ok(CatalogEntry {
        name: Some(display_name(&filename)),
        url: url.to_string(),
        checksum: Some(checksum),
        checksum_url,
        filename: Some(filename),
        architecture: Some(architecture.to_string()),
    })
}

/// Normalize the checksum input to `sha256:<hex>`.
///
/// A URL input is fetched and scanned as a manifest; its source URL is
/// returned alongside the checksum. Bare digests are lowercased; prefixed
/// digests pass through verbatim.
fn resolve_checksum(
    fetcher: &HttpFetcher,
    input: &str,
    filename: &str,
    output: &dyn Output,
) -> VaultResult<(String, Option<String>)> {
    if input.starts_with("http://") || input.starts_with("https://") {
        output.line("  OK Downloading checksum file...");
        let body = fetcher.fetch_text(input)?;

        let checksum =
            manifest_checksum(&body, filename).ok_or_else(|| VaultError::ChecksumNotFound {
                filename: filename.to_string(),
                manifest_url: input.to_string(),
            })?;

        output.line(&format!("  OK Extracted checksum: {}", checksum));
        return Ok((checksum, Some(input.to_string())));
    }

    if hex64_pattern().is_match(input) {
        return Ok((format!("sha256:{}", input.to_lowercase()), None));
    }

    if input.starts_with("sha256:") {
        return Ok((input.to_string(), None));
    }

    Err(VaultError::InvalidChecksumFormat {
        token: input.to_string(),
    })
}

/// Scan checksum manifest lines for the given filename.
///
/// A line qualifies with at least two whitespace-separated fields: the hash
/// first, the referenced filename last, with one leading `*` (the binary
/// marker in `sha256sum` output) stripped. The filename comparison is
/// exact; the first matching line wins.
fn manifest_checksum(body: &str, filename: &str) -> Option<String> {
    for line in body.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }

        let hash = fields[0];
        let referenced = fields[fields.len() - 1];
        let referenced = referenced.strip_prefix('*').unwrap_or(referenced);

        if referenced == filename {
            return Some(format!("sha256:{}", hash));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingOutput {
        lines: RefCell<Vec<String>>,
    }

    impl RecordingOutput {
        fn new() -> Self {
            Self {
                lines: RefCell::new(Vec::new()),
            }
        }
    }

    impl Output for RecordingOutput {
        fn line(&self, text: &str) {
            self.lines.borrow_mut().push(text.to_string());
        }

        fn progress(&self, _downloaded: u64, _total: Option<u64>) {}

        fn progress_done(&self) {}
    }

    const DIGEST: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_derive_entry_from_bare_digest() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();

        let entry = derive_entry(
            &fetcher,
            "https://example.com/isos/debian-12.5.0-amd64-netinst.iso",
            DIGEST,
            &output,
        )
        .unwrap();

        assert_eq!(entry.name.as_deref(), Some("Debian 12.5.0 Amd64 Netinst"));
        assert_eq!(entry.filename.as_deref(), Some("debian-12.5.0-amd64-netinst.iso"));
        assert_eq!(entry.architecture.as_deref(), Some("amd64"));
        assert_eq!(entry.checksum.as_deref(), Some(format!("sha256:{}", DIGEST).as_str()));
        assert_eq!(entry.checksum_url, None);
    }

    #[test]
    fn test_derive_entry_reports_steps() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();

        derive_entry(
            &fetcher,
            "https://example.com/isos/debian-12.5.0-amd64-netinst.iso",
            DIGEST,
            &output,
        )
        .unwrap();

        let lines = output.lines.borrow();
        assert_eq!(lines[0], "  OK Extracted filename: debian-12.5.0-amd64-netinst.iso");
        assert_eq!(lines[1], "  OK Detected architecture: amd64");
    }

    #[test]
    fn test_derive_entry_uppercase_digest_is_lowercased() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();

        let entry = derive_entry(
            &fetcher,
            "https://example.com/x.iso",
            DIGEST.to_uppercase().as_str(),
            &output,
        )
        .unwrap();

        assert_eq!(entry.checksum.as_deref(), Some(format!("sha256:{}", DIGEST).as_str()));
    }

    #[test]
    fn test_derive_entry_prefixed_digest_passes_through() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();
        let prefixed = format!("sha256:{}", DIGEST);

        let entry =
            derive_entry(&fetcher, "https://example.com/x.iso", &prefixed, &output).unwrap();

        assert_eq!(entry.checksum.as_deref(), Some(prefixed.as_str()));
    }

    #[test]
    fn test_derive_entry_rejects_unrecognized_checksum() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();

        let err = derive_entry(&fetcher, "https://example.com/x.iso", "not-a-checksum", &output)
            .unwrap_err();

        assert!(matches!(err, VaultError::InvalidChecksumFormat { .. }));
    }

    #[test]
    fn test_derive_entry_rejects_short_digest() {
        let fetcher = HttpFetcher::new();
        let output = RecordingOutput::new();

        let err =
            derive_entry(&fetcher, "https://example.com/x.iso", &DIGEST[..63], &output).unwrap_err();

        assert!(matches!(err, VaultError::InvalidChecksumFormat { .. }));
    }

    #[test]
    fn test_manifest_checksum_plain_format() {
        let body = format!("{}  debian-12.iso\nother  other.iso\n", DIGEST);

        assert_eq!(
            manifest_checksum(&body, "debian-12.iso"),
            Some(format!("sha256:{}", DIGEST))
        );
    }

    #[test]
    fn test_manifest_checksum_strips_binary_marker() {
        let body = format!("{} *debian-12.iso\n", DIGEST);

        assert_eq!(
            manifest_checksum(&body, "debian-12.iso"),
            Some(format!("sha256:{}", DIGEST))
        );
    }

    #[test]
    fn test_manifest_checksum_first_match_wins() {
        let body = "aaa  debian-12.iso\nbbb  debian-12.iso\n";

        assert_eq!(manifest_checksum(body, "debian-12.iso"), Some("sha256:aaa".to_string()));
    }

    #[test]
    fn test_manifest_checksum_exact_filename_only() {
        let body = format!("{}  debian-12.iso\n", DIGEST);

        assert_eq!(manifest_checksum(&body, "debian-12.ISO"), None);
        assert_eq!(manifest_checksum(&body, "debian-1.iso"), None);
    }

    #[test]
    fn test_manifest_checksum_skips_non_entry_lines() {
        let body = format!("SHA256SUMS\n\n{}  debian-12.iso\n", DIGEST);

        assert!(manifest_checksum(&body, "debian-12.iso").is_some());
    }
}
