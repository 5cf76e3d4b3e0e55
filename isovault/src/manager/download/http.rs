//! Blocking HTTP fetcher with manual redirect handling.
//!
//! Redirects are followed by the fetcher itself rather than by the client,
//! keeping the hop bound an explicit, testable limit. TLS peer verification
//! is always on; there is no insecure escape hatch.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{header, redirect, Url};
use tracing::debug;

use crate::error::{VaultError, VaultResult};

/// Byte-progress callback: `(bytes_downloaded, total_bytes)`.
///
/// The total is the server-declared content length when known.
pub type ProgressFn<'a> = dyn Fn(u64, Option<u64>) + 'a;

/// Maximum redirect hops followed per fetch.
pub const DEFAULT_REDIRECT_LIMIT: usize = 5;

/// Connect timeout in seconds. Transfers themselves are not time-bounded.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Buffer size for streaming response bodies to disk (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Blocking downloader for images and checksum manifests.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    pub(crate) redirect_limit: usize,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with the default redirect limit.
    pub fn new() -> Self {
        Self::with_redirect_limit(DEFAULT_REDIRECT_LIMIT)
    }

    /// Create a fetcher with a custom redirect limit.
    pub fn with_redirect_limit(redirect_limit: usize) -> Self {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            redirect_limit,
        }
    }

    /// Stream `url` into `dest`, following up to `redirect_limit` redirects.
    ///
    /// A chain of exactly `redirect_limit` hops still succeeds; one more
    /// fails. Progress is reported after every chunk written. The
    /// destination is created or truncated once a success response arrives,
    /// so a mid-transfer failure leaves the partial file behind.
    ///
    /// # Returns
    ///
    /// Total bytes written to `dest`.
    ///
    /// # Errors
    ///
    /// [`VaultError::DownloadFailed`] for transport failures,
    /// [`VaultError::HttpStatus`] for non-success responses,
    /// [`VaultError::TooManyRedirects`] when the chain exceeds the limit,
    /// [`VaultError::InvalidUrl`] for unresolvable redirect targets, and
    /// [`VaultError::WriteFailed`] when the destination cannot be written.
    pub fn fetch(&self, url: &str, dest: &Path, progress: Option<&ProgressFn>) -> VaultResult<u64> {
        let mut current = url.to_string();

        for _ in 0..=self.redirect_limit {
            let response = self.send_get(&current)?;
            let status = response.status();

            if status.is_redirection() {
                current = redirect_target(&current, &response)?;
                debug!(url = %current, "Following redirect");
                continue;
            }

            if !status.is_success() {
                return Err(VaultError::HttpStatus {
                    url: current,
                    status: status.as_u16(),
                });
            }

            return stream_to_file(response, &current, dest, progress);
        }

        Err(VaultError::TooManyRedirects {
            url: url.to_string(),
            limit: self.redirect_limit,
        })
    }

    /// Fetch a small text body with a single GET.
    ///
    /// Used for checksum manifests. Redirects are not followed here; a
    /// redirect response is reported as an HTTP error.
    pub fn fetch_text(&self, url: &str) -> VaultResult<String> {
        let response = self.send_get(url)?;
        let status = response.status();

        if !status.is_success() {
            return Err(VaultError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| VaultError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn send_get(&self, url: &str) -> VaultResult<Response> {
        self.client
            .get(url)
            .send()
            .map_err(|e| VaultError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Resolve the `Location` header against the URL that produced the redirect.
fn redirect_target(current: &str, response: &Response) -> VaultResult<String> {
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| VaultError::InvalidUrl {
            url: current.to_string(),
            reason: "redirect response without a Location header".to_string(),
        })?;

    let base = Url::parse(current).map_err(|e| VaultError::InvalidUrl {
        url: current.to_string(),
        reason: e.to_string(),
    })?;

    let target = base.join(location).map_err(|e| VaultError::InvalidUrl {
        url: location.to_string(),
        reason: e.to_string(),
    })?;

    Ok(target.into())
}

/// Stream a success response body into the destination file.
fn stream_to_file(
    mut response: Response,
    url: &str,
    dest: &Path,
    progress: Option<&ProgressFn>,
) -> VaultResult<u64> {
    let total = response.content_length();

    let file = File::create(dest).map_err(|e| VaultError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut downloaded: u64 = 0;

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| VaultError::DownloadFailed {
                url: url.to_string(),
                reason: format!("Read error: {}", e),
            })?;

        if bytes_read == 0 {
            break;
        }

        writer
            .write_all(&buffer[..bytes_read])
            .map_err(|e| VaultError::WriteFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;

        downloaded += bytes_read as u64;

        if let Some(report) = progress {
            report(downloaded, total);
        }
    }

    writer.flush().map_err(|e| VaultError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    debug!(url = %url, bytes = downloaded, "Download complete");
    Ok(downloaded)
}
