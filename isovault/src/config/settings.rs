//! Runtime settings controlling where downloaded images are stored.

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use super::document::load_document;
use super::merge::deep_merge;
use super::paths::VaultPaths;

/// Resolved runtime settings.
///
/// Settings load is infallible: damaged or absent files fall back to
/// defaults, because a broken settings file should never block a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    iso_dir: PathBuf,
}

impl Settings {
    /// Load and merge the global and project settings documents.
    ///
    /// The project document overrides the global one field by field. The
    /// only setting read today is `iso.iso_dir`; `$HOME` and
    /// `$XDG_CACHE_HOME` placeholders in its value expand to the resolved
    /// home directory and cache root. Without a configured value the
    /// default under the user cache directory applies.
    pub fn load(paths: &VaultPaths) -> Self {
        let merged = deep_merge(
            load_document(&paths.global_settings_file()),
            load_document(&paths.project_settings_file()),
        );

        let iso_dir = merged
            .get("iso")
            .and_then(|iso| iso.get("iso_dir"))
            .and_then(Value::as_str)
            .map(|raw| expand_placeholders(raw, paths))
            .unwrap_or_else(|| paths.default_iso_dir());

        Self { iso_dir }
    }

    /// Build settings with an explicit image directory.
    pub fn with_iso_dir(iso_dir: impl Into<PathBuf>) -> Self {
        Self {
            iso_dir: iso_dir.into(),
        }
    }

    /// Directory downloaded images are stored in.
    pub fn iso_dir(&self) -> &Path {
        &self.iso_dir
    }
}

/// Replace `$HOME` and `$XDG_CACHE_HOME` tokens with their resolved paths.
fn expand_placeholders(raw: &str, paths: &VaultPaths) -> PathBuf {
    let expanded = raw
        .replace("$HOME", &paths.home_dir().to_string_lossy())
        .replace("$XDG_CACHE_HOME", &paths.cache_root().to_string_lossy());

    PathBuf::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths_in(temp: &TempDir) -> VaultPaths {
        let root = temp.path();
        VaultPaths::new(root.join("config"), root.join("cache"), root.join("project"))
            .with_home_dir(root.join("home"))
    }

    fn write_settings(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_default_iso_dir_without_settings() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), paths.default_iso_dir());
    }

    #[test]
    fn test_global_settings_set_iso_dir() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(&paths.global_settings_file(), "iso:\n  iso_dir: /mnt/isos\n");

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), Path::new("/mnt/isos"));
    }

    #[test]
    fn test_project_settings_override_global() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(&paths.global_settings_file(), "iso:\n  iso_dir: /mnt/global\n");
        write_settings(&paths.project_settings_file(), "iso:\n  iso_dir: /mnt/project\n");

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), Path::new("/mnt/project"));
    }

    #[test]
    fn test_home_placeholder_expands() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(&paths.global_settings_file(), "iso:\n  iso_dir: $HOME/isos\n");

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), temp.path().join("home").join("isos"));
    }

    #[test]
    fn test_cache_placeholder_expands() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(
            &paths.global_settings_file(),
            "iso:\n  iso_dir: $XDG_CACHE_HOME/images\n",
        );

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), temp.path().join("cache").join("images"));
    }

    #[test]
    fn test_malformed_settings_fall_back_to_default() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(&paths.global_settings_file(), "iso: [unclosed\n");

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), paths.default_iso_dir());
    }

    #[test]
    fn test_non_string_iso_dir_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let paths = paths_in(&temp);
        write_settings(&paths.global_settings_file(), "iso:\n  iso_dir:\n    nested: true\n");

        let settings = Settings::load(&paths);

        assert_eq!(settings.iso_dir(), paths.default_iso_dir());
    }
}
