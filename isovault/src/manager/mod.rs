//! Catalog orchestration: list, download, verify, add.
//!
//! [`IsoManager`] ties the layered catalog, the runtime settings, and the
//! HTTP fetcher together behind the operations the command-line surface
//! exposes. All terminal contact goes through the [`Output`] and
//! [`Interaction`] seams so the operations test without a terminal.
//!
//! Single-entry operations return `Ok(false)` for expected, already
//! reported failures (unknown key, declined overwrite, checksum mismatch,
//! network trouble) and reserve `Err` for conditions the caller cannot
//! recover from, such as filesystem failures. Bulk operations catch
//! per-entry errors and keep going.

pub mod download;
pub mod resolve;
pub mod traits;
pub mod verify;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{catalog_key, CatalogEntry, CatalogStore};
use crate::config::Settings;
use crate::error::{VaultError, VaultResult};

use download::HttpFetcher;

pub use traits::{Interaction, Output};

/// Column width for filenames in bulk verification rows.
const VERIFY_COLUMN_WIDTH: usize = 35;

/// Hex characters shown when previewing a checksum.
const HASH_PREVIEW_LEN: usize = 16;

/// Units for human-readable sizes, 1024-based.
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Three-state listing status for an entry's local file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// File present and its hash matches the catalog checksum.
    Verified,
    /// File present; hash missing or mismatched.
    Downloaded,
    /// No file on disk.
    Missing,
}

impl EntryStatus {
    /// Lowercase status word shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Downloaded => "downloaded",
            Self::Missing => "missing",
        }
    }
}

/// Orchestrates catalog operations against the local image directory.
pub struct IsoManager<'a> {
    store: CatalogStore,
    settings: Settings,
    fetcher: HttpFetcher,
    output: &'a dyn Output,
    interaction: &'a dyn Interaction,
}

impl<'a> IsoManager<'a> {
    /// Create a manager, ensuring the image directory exists.
    pub fn new(
        store: CatalogStore,
        settings: Settings,
        output: &'a dyn Output,
        interaction: &'a dyn Interaction,
    ) -> VaultResult<Self> {
        fs::create_dir_all(settings.iso_dir()).map_err(|e| VaultError::CreateDirFailed {
            path: settings.iso_dir().to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            store,
            settings,
            fetcher: HttpFetcher::new(),
            output,
            interaction,
        })
    }

    /// Replace the HTTP fetcher, e.g. to change the redirect limit.
    pub fn with_fetcher(mut self, fetcher: HttpFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// List catalog entries in key order.
    ///
    /// The long format adds a size column, a per-entry status, and an
    /// aggregate size line covering the files actually on disk.
    pub fn list(&self, long: bool) {
        if self.store.is_empty() {
            self.output
                .line("No ISOs in catalog. Use \"isovault add\" to add some.");
            return;
        }

        if long {
            self.list_long();
        } else {
            for key in self.store.entries().keys() {
                self.output.line(key);
            }
        }
    }

    fn list_long(&self) {
        let key_width = self
            .store
            .entries()
            .keys()
            .map(|key| key.len())
            .max()
            .unwrap_or(0);

        let mut total_bytes: u64 = 0;

        for (key, entry) in self.store.entries() {
            let path = self.destination(key, entry);

            let (size_column, status) = match fs::metadata(&path) {
                Ok(meta) => {
                    total_bytes += meta.len();
                    let status = if self.entry_verified(entry, &path) {
                        EntryStatus::Verified
                    } else {
                        EntryStatus::Downloaded
                    };
                    (format_bytes(meta.len()), status)
                }
                Err(_) => ("-".to_string(), EntryStatus::Missing),
            };

            self.output.line(&format!(
                "{:<key_width$}  {:>10}  {}",
                key,
                size_column,
                self.output.status_label(status),
            ));
        }

        self.output.line("");
        self.output.line(&format!("Total: {}", format_bytes(total_bytes)));
    }

    /// Download one entry and verify the result.
    ///
    /// When the file already exists the user is asked before re-downloading
    /// unless `force` is set; declining is a quiet `Ok(false)` with no
    /// network activity.
    ///
    /// # Returns
    ///
    /// The verification outcome of the downloaded file.
    pub fn download(&self, key: &str, force: bool) -> VaultResult<bool> {
        let Some(entry) = self.store.get(key) else {
            self.output
                .line(&format!("Error: ISO '{}' not found in catalog", key));
            return Ok(false);
        };

        let filename = entry.local_filename(key);
        let dest = self.destination(key, entry);

        if dest.exists() && !force && !self.interaction.confirm("File exists. Re-download?") {
            return Ok(false);
        }

        self.output.line(&format!("Downloading {}...", filename));
        if !self.fetch_entry(entry, &dest)? {
            return Ok(false);
        }
        self.output.line("");

        self.output.line("Verifying checksum...");
        self.verify(key, false)
    }

    /// Download every entry whose file is absent, verifying each.
    ///
    /// Entries are processed one at a time in key order; a failure for one
    /// entry never aborts the rest.
    ///
    /// # Returns
    ///
    /// The number of entries downloaded and verified successfully.
    pub fn download_all(&self) -> usize {
        let missing: Vec<(&String, &CatalogEntry)> = self
            .store
            .entries()
            .iter()
            .filter(|(key, entry)| !self.destination(key, entry).exists())
            .collect();

        if missing.is_empty() {
            self.output.line("All ISOs are already downloaded.");
            return 0;
        }

        self.output.line("Downloading missing ISOs...");
        self.output.line("");

        let total = missing.len();
        let mut downloaded = 0;

        for (index, (key, entry)) in missing.into_iter().enumerate() {
            self.output
                .line(&format!("[{}/{}] Downloading {}...", index + 1, total, key));

            let dest = self.destination(key, entry);
            let fetched = match self.fetch_entry(entry, &dest) {
                Ok(fetched) => fetched,
                Err(err) => {
                    self.output.line(&format!("Error: {}", err));
                    false
                }
            };

            if fetched && self.verify(key, true).unwrap_or(false) {
                self.output.line("OK Downloaded and verified");
                downloaded += 1;
            } else if fetched {
                self.output.line("FAIL Checksum verification failed");
            }
            self.output.line("");
        }

        self.output
            .line(&format!("Summary: {} ISOs downloaded successfully", downloaded));

        downloaded
    }

    /// Verify one entry's on-disk file against its catalog checksum.
    ///
    /// `silent` suppresses the per-item output for use inside bulk
    /// operations; the outcome is returned either way.
    pub fn verify(&self, key: &str, silent: bool) -> VaultResult<bool> {
        let Some(entry) = self.store.get(key) else {
            if !silent {
                self.output
                    .line(&format!("Error: ISO '{}' not found in catalog", key));
            }
            return Ok(false);
        };

        let filename = entry.local_filename(key);
        let path = self.destination(key, entry);

        if !path.exists() {
            if !silent {
                self.output.line(&format!(
                    "Error: File '{}' not found in {}",
                    filename,
                    self.settings.iso_dir().display()
                ));
            }
            return Ok(false);
        }

        if !silent {
            self.output.line(&format!("Verifying {}...", filename));
        }

        let actual = verify::file_sha256(&path)?;
        let expected = verify::strip_algorithm_prefix(entry.checksum.as_deref().unwrap_or(""));

        if actual.eq_ignore_ascii_case(expected) {
            if !silent {
                self.output.line(&format!(
                    "OK Checksum matches: sha256:{}...",
                    hash_preview(&actual)
                ));
            }
            Ok(true)
        } else {
            if !silent {
                self.output.line("FAIL Checksum mismatch!");
                self.output
                    .line(&format!("  Expected: sha256:{}...", hash_preview(expected)));
                self.output
                    .line(&format!("  Got:      sha256:{}...", hash_preview(&actual)));
            }
            Ok(false)
        }
    }

    /// Verify every entry whose file is on disk, tallying pass and fail.
    ///
    /// Absent files are out of scope for the summary, not failures. Hash
    /// read errors count as failures instead of aborting the run.
    ///
    /// # Returns
    ///
    /// `(passed, failed)` counts.
    pub fn verify_all(&self) -> (usize, usize) {
        let downloaded: Vec<(&String, &CatalogEntry)> = self
            .store
            .entries()
            .iter()
            .filter(|(key, entry)| self.destination(key, entry).exists())
            .collect();

        if downloaded.is_empty() {
            self.output.line("No downloaded ISOs to verify.");
            return (0, 0);
        }

        self.output.line("Verifying downloaded ISOs...");
        self.output.line("");

        let mut passed = 0;
        let mut failed = 0;

        for (key, entry) in downloaded {
            let ok = self.verify(key, true).unwrap_or(false);
            let status = if ok { "OK" } else { "FAIL Checksum mismatch" };

            self.output.line(&format!(
                "{:<width$} {}",
                entry.local_filename(key),
                status,
                width = VERIFY_COLUMN_WIDTH
            ));

            if ok {
                passed += 1;
            } else {
                failed += 1;
            }
        }

        self.output.line("");
        self.output
            .line(&format!("Summary: {} passed, {} failed", passed, failed));

        (passed, failed)
    }

    /// Interactively add a new entry to the catalog.
    ///
    /// Collects a URL and checksum input, derives the remaining metadata,
    /// and saves a new fragment. Any resolver failure aborts with nothing
    /// saved.
    pub fn add(&self) -> VaultResult<bool> {
        self.output.line("Add New ISO to Catalog");
        self.output.line("");

        let url = self.interaction.prompt("ISO URL");
        if !url.starts_with("http://") && !url.starts_with("https://") {
            self.output
                .line("Error: URL must start with http:// or https://");
            return Ok(false);
        }

        let checksum_input = self.interaction.prompt("Checksum (hash or URL)");

        self.output.line("");
        self.output.line("Processing...");

        let entry = match resolve::derive_entry(&self.fetcher, &url, &checksum_input, self.output) {
            Ok(entry) => entry,
            Err(err) if err.is_network() || is_input_error(&err) => {
                self.output.line(&format!("Error: {}", err));
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        let filename = entry.filename.clone().unwrap_or_default();
        let key = catalog_key(&filename);

        self.output.line("");
        self.output.line(&format!("Adding to catalog as: {}", key));
        self.output.line("");

        for (label, value) in [
            ("name", entry.name.as_deref()),
            ("url", Some(entry.url.as_str())),
            ("checksum", entry.checksum.as_deref()),
            ("checksum_url", entry.checksum_url.as_deref()),
            ("filename", entry.filename.as_deref()),
            ("architecture", entry.architecture.as_deref()),
        ] {
            if let Some(value) = value {
                self.output.line(&format!("{}: {}", label, value));
            }
        }

        let fragment = self.store.save(&key, &entry)?;
        debug!(path = %fragment.display(), "Catalog entry added");

        self.output.line("");
        self.output.line("OK Added to catalog");
        Ok(true)
    }

    /// Print the resolved configuration.
    pub fn show_config(&self) {
        self.output
            .line(&format!("iso_dir: {}", self.settings.iso_dir().display()));
    }

    /// Destination path for an entry's image file.
    fn destination(&self, key: &str, entry: &CatalogEntry) -> PathBuf {
        self.settings.iso_dir().join(entry.local_filename(key))
    }

    /// Whether the on-disk file matches the entry checksum.
    ///
    /// Hash failures count as not verified.
    fn entry_verified(&self, entry: &CatalogEntry, path: &Path) -> bool {
        let expected = entry.checksum.as_deref().unwrap_or("");
        verify::verify_file(path, expected).unwrap_or(false)
    }

    /// Stream an entry's URL to `dest`, reporting progress.
    ///
    /// Network failures are reported through the output and yield
    /// `Ok(false)`; anything else propagates.
    fn fetch_entry(&self, entry: &CatalogEntry, dest: &Path) -> VaultResult<bool> {
        let report = |bytes: u64, total: Option<u64>| self.output.progress(bytes, total);
        let result = self.fetcher.fetch(&entry.url, dest, Some(&report));
        self.output.progress_done();

        match result {
            Ok(_) => Ok(true),
            Err(err) if err.is_network() => {
                self.output.line(&format!("Error: {}", err));
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

/// Whether an error blames the user's input rather than the environment.
fn is_input_error(err: &VaultError) -> bool {
    matches!(
        err,
        VaultError::InvalidUrl { .. }
            | VaultError::InvalidFilename { .. }
            | VaultError::InvalidChecksumFormat { .. }
            | VaultError::ChecksumNotFound { .. }
    )
}

/// First characters of a hex digest, for compact display.
fn hash_preview(hash: &str) -> &str {
    hash.get(..HASH_PREVIEW_LEN).unwrap_or(hash)
}

/// Human-readable size, 1024-based with two decimals.
fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);

    format!(
        "{:.2} {}",
        bytes as f64 / 1024_f64.powi(exponent as i32),
        SIZE_UNITS[exponent]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultPaths;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    /// SHA-256 of the string "hello world".
    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    struct RecordingOutput {
        lines: RefCell<Vec<String>>,
    }

    impl RecordingOutput {
        fn new() -> Self {
            Self {
                lines: RefCell::new(Vec::new()),
            }
        }

        fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }

        fn contains(&self, needle: &str) -> bool {
            self.lines.borrow().iter().any(|line| line.contains(needle))
        }
    }

    impl Output for RecordingOutput {
        fn line(&self, text: &str) {
            self.lines.borrow_mut().push(text.to_string());
        }

        fn progress(&self, _downloaded: u64, _total: Option<u64>) {}

        fn progress_done(&self) {}
    }

    struct ScriptedInteraction {
        confirms: RefCell<VecDeque<bool>>,
        prompts: RefCell<VecDeque<String>>,
    }

    impl ScriptedInteraction {
        fn new() -> Self {
            Self {
                confirms: RefCell::new(VecDeque::new()),
                prompts: RefCell::new(VecDeque::new()),
            }
        }

        fn with_prompts(answers: &[&str]) -> Self {
            let interaction = Self::new();
            for answer in answers {
                interaction
                    .prompts
                    .borrow_mut()
                    .push_back(answer.to_string());
            }
            interaction
        }

        fn with_confirm(self, answer: bool) -> Self {
            self.confirms.borrow_mut().push_back(answer);
            self
        }
    }

    impl Interaction for ScriptedInteraction {
        fn confirm(&self, _prompt: &str) -> bool {
            self.confirms.borrow_mut().pop_front().unwrap_or(false)
        }

        fn prompt(&self, _label: &str) -> String {
            self.prompts.borrow_mut().pop_front().unwrap_or_default()
        }
    }

    struct Fixture {
        _temp: TempDir,
        paths: VaultPaths,
        iso_dir: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let root = temp.path();
            let paths = VaultPaths::new(root.join("config"), root.join("cache"), root.join("project"));
            let iso_dir = root.join("isos");

            Self {
                _temp: temp,
                paths,
                iso_dir,
            }
        }

        fn write_catalog(&self, content: &str) {
            let file = self.paths.project_catalog_file();
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        }

        fn write_iso(&self, filename: &str, content: &[u8]) {
            fs::create_dir_all(&self.iso_dir).unwrap();
            fs::write(self.iso_dir.join(filename), content).unwrap();
        }

        fn manager<'a>(
            &self,
            output: &'a RecordingOutput,
            interaction: &'a ScriptedInteraction,
        ) -> IsoManager<'a> {
            let store = CatalogStore::load(&self.paths);
            let settings = Settings::with_iso_dir(&self.iso_dir);
            IsoManager::new(store, settings, output, interaction).unwrap()
        }
    }

    fn hello_world_catalog() -> String {
        format!(
            "demo:\n  url: https://example.com/demo.iso\n  checksum: sha256:{}\n  filename: demo.iso\n",
            HELLO_WORLD_SHA256
        )
    }

    #[test]
    fn test_new_creates_iso_dir() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        fixture.manager(&output, &interaction);

        assert!(fixture.iso_dir.is_dir());
    }

    #[test]
    fn test_list_empty_catalog() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        fixture.manager(&output, &interaction).list(false);

        assert_eq!(
            output.lines(),
            ["No ISOs in catalog. Use \"isovault add\" to add some."]
        );
    }

    #[test]
    fn test_list_short_prints_sorted_keys() {
        let fixture = Fixture::new();
        fixture.write_catalog(
            "zeta:\n  url: https://example.com/z.iso\nalpha:\n  url: https://example.com/a.iso\n",
        );
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        fixture.manager(&output, &interaction).list(false);

        assert_eq!(output.lines(), ["alpha", "zeta"]);
    }

    #[test]
    fn test_list_long_reports_status_and_total() {
        let fixture = Fixture::new();
        fixture.write_catalog(&format!(
            concat!(
                "good:\n  url: https://example.com/good.iso\n",
                "  checksum: sha256:{}\n  filename: good.iso\n",
                "stale:\n  url: https://example.com/stale.iso\n",
                "  checksum: sha256:{}\n  filename: stale.iso\n",
                "absent:\n  url: https://example.com/absent.iso\n  filename: absent.iso\n",
            ),
            HELLO_WORLD_SHA256, HELLO_WORLD_SHA256
        ));
        fixture.write_iso("good.iso", b"hello world");
        fixture.write_iso("stale.iso", b"corrupted");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();
        fixture.manager(&output, &interaction).list(true);

        let lines = output.lines();
        let good = lines.iter().find(|l| l.starts_with("good")).unwrap();
        let stale = lines.iter().find(|l| l.starts_with("stale")).unwrap();
        let absent = lines.iter().find(|l| l.starts_with("absent")).unwrap();

        assert!(good.contains("verified"));
        assert!(stale.contains("downloaded"));
        assert!(absent.contains("missing"));
        assert!(absent.contains("-"), "missing entries have no size");

        // 11 bytes of "hello world" plus 9 bytes of "corrupted".
        assert_eq!(lines.last().unwrap(), "Total: 20.00 B");
    }

    #[test]
    fn test_download_unknown_key() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .download("nope", false)
            .unwrap();

        assert!(!result);
        assert!(output.contains("Error: ISO 'nope' not found in catalog"));
    }

    #[test]
    fn test_download_declined_overwrite_is_quiet() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());
        fixture.write_iso("demo.iso", b"hello world");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new().with_confirm(false);

        let result = fixture
            .manager(&output, &interaction)
            .download("demo", false)
            .unwrap();

        assert!(!result);
        assert!(output.lines().is_empty(), "declining produces no output");
    }

    #[test]
    fn test_verify_unknown_key() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("nope", false)
            .unwrap();

        assert!(!result);
        assert!(output.contains("Error: ISO 'nope' not found in catalog"));
    }

    #[test]
    fn test_verify_missing_file() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("demo", false)
            .unwrap();

        assert!(!result);
        assert!(output.contains("Error: File 'demo.iso' not found in"));
    }

    #[test]
    fn test_verify_matching_file() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());
        fixture.write_iso("demo.iso", b"hello world");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("demo", false)
            .unwrap();

        assert!(result);
        assert!(output.contains("Verifying demo.iso..."));
        assert!(output.contains(&format!(
            "OK Checksum matches: sha256:{}...",
            &HELLO_WORLD_SHA256[..16]
        )));
    }

    #[test]
    fn test_verify_mismatch_previews_both_hashes() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());
        fixture.write_iso("demo.iso", b"tampered");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("demo", false)
            .unwrap();

        assert!(!result);
        assert!(output.contains("FAIL Checksum mismatch!"));
        assert!(output.contains(&format!("  Expected: sha256:{}...", &HELLO_WORLD_SHA256[..16])));
        assert!(output.contains("  Got:      sha256:"));
    }

    #[test]
    fn test_verify_accepts_uppercase_expected_hash() {
        let fixture = Fixture::new();
        fixture.write_catalog(&format!(
            "demo:\n  url: https://example.com/demo.iso\n  checksum: sha256:{}\n  filename: demo.iso\n",
            HELLO_WORLD_SHA256.to_uppercase()
        ));
        fixture.write_iso("demo.iso", b"hello world");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("demo", false)
            .unwrap();

        assert!(result);
    }

    #[test]
    fn test_verify_silent_produces_no_output() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());
        fixture.write_iso("demo.iso", b"hello world");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let result = fixture
            .manager(&output, &interaction)
            .verify("demo", true)
            .unwrap();

        assert!(result);
        assert!(output.lines().is_empty());
    }

    #[test]
    fn test_verify_all_skips_absent_files() {
        let fixture = Fixture::new();
        fixture.write_catalog(&format!(
            concat!(
                "good:\n  url: https://example.com/good.iso\n",
                "  checksum: sha256:{}\n  filename: good.iso\n",
                "bad:\n  url: https://example.com/bad.iso\n",
                "  checksum: sha256:{}\n  filename: bad.iso\n",
                "absent:\n  url: https://example.com/absent.iso\n  filename: absent.iso\n",
            ),
            HELLO_WORLD_SHA256, HELLO_WORLD_SHA256
        ));
        fixture.write_iso("good.iso", b"hello world");
        fixture.write_iso("bad.iso", b"corrupted");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let (passed, failed) = fixture.manager(&output, &interaction).verify_all();

        assert_eq!((passed, failed), (1, 1));
        assert!(output.contains("Summary: 1 passed, 1 failed"));
        assert!(!output.contains("absent.iso"), "absent files stay out of the report");
    }

    #[test]
    fn test_verify_all_without_downloads() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let (passed, failed) = fixture.manager(&output, &interaction).verify_all();

        assert_eq!((passed, failed), (0, 0));
        assert_eq!(output.lines(), ["No downloaded ISOs to verify."]);
    }

    #[test]
    fn test_download_all_nothing_missing() {
        let fixture = Fixture::new();
        fixture.write_catalog(&hello_world_catalog());
        fixture.write_iso("demo.iso", b"hello world");

        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        let downloaded = fixture.manager(&output, &interaction).download_all();

        assert_eq!(downloaded, 0);
        assert_eq!(output.lines(), ["All ISOs are already downloaded."]);
    }

    #[test]
    fn test_add_with_bare_digest_saves_fragment() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::with_prompts(&[
            "https://example.com/isos/debian-12.5.0-amd64-netinst.iso",
            HELLO_WORLD_SHA256,
        ]);

        let result = fixture.manager(&output, &interaction).add().unwrap();

        assert!(result);
        assert!(output.contains("Adding to catalog as: debian-12.5.0-amd64-netinst"));
        assert!(output.contains("OK Added to catalog"));

        let reloaded = CatalogStore::load(&fixture.paths);
        let entry = reloaded.get("debian-12.5.0-amd64-netinst").unwrap();
        assert_eq!(entry.architecture.as_deref(), Some("amd64"));
        assert_eq!(
            entry.checksum.as_deref(),
            Some(format!("sha256:{}", HELLO_WORLD_SHA256).as_str())
        );
    }

    #[test]
    fn test_add_rejects_non_http_url() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::with_prompts(&["ftp://example.com/x.iso"]);

        let result = fixture.manager(&output, &interaction).add().unwrap();

        assert!(!result);
        assert!(output.contains("Error: URL must start with http:// or https://"));
    }

    #[test]
    fn test_add_rejects_bad_checksum_input() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction =
            ScriptedInteraction::with_prompts(&["https://example.com/x.iso", "garbage"]);

        let result = fixture.manager(&output, &interaction).add().unwrap();

        assert!(!result);
        assert!(output.contains("Error: checksum must be 64 hex characters"));

        let reloaded = CatalogStore::load(&fixture.paths);
        assert!(reloaded.is_empty(), "nothing is saved on a failed add");
    }

    #[test]
    fn test_show_config_prints_iso_dir() {
        let fixture = Fixture::new();
        let output = RecordingOutput::new();
        let interaction = ScriptedInteraction::new();

        fixture.manager(&output, &interaction).show_config();

        assert_eq!(
            output.lines(),
            [format!("iso_dir: {}", fixture.iso_dir.display())]
        );
    }

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn test_format_bytes_sub_kilobyte() {
        assert_eq!(format_bytes(512), "512.00 B");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_format_bytes_caps_at_largest_unit() {
        let two_pb = 2_u64 * 1024 * 1024 * 1024 * 1024 * 1024;
        assert_eq!(format_bytes(two_pb), "2048.00 TB");
    }

    #[test]
    fn test_hash_preview_truncates() {
        assert_eq!(hash_preview(HELLO_WORLD_SHA256), &HELLO_WORLD_SHA256[..16]);
        assert_eq!(hash_preview("short"), "short");
    }
}
