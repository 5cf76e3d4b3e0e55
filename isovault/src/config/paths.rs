//! Filesystem locations for configuration layers and downloaded images.
//!
//! All path discovery lives here. The rest of the library receives a
//! [`VaultPaths`] value, so tests point it at temporary directories instead
//! of mutating process environment variables.

use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the config and cache roots.
const APP_DIR: &str = "isovault";

/// Drop-in catalog fragment directory, inside the config dir.
const CATALOG_FRAGMENT_DIR: &str = "isos.d";

/// Drop-in profile fragment directory, inside the config dir.
const PROFILE_FRAGMENT_DIR: &str = "profiles.d";

/// Project-local catalog file.
const PROJECT_CATALOG_FILE: &str = "isos.yml";

/// Project-local profile file.
const PROJECT_PROFILE_FILE: &str = "profiles.yml";

/// Runtime settings file, present globally and per project.
const SETTINGS_FILE: &str = "isovault.yml";

/// Resolved filesystem locations for one invocation.
#[derive(Clone, Debug)]
pub struct VaultPaths {
    home_dir: PathBuf,
    cache_root: PathBuf,
    config_dir: PathBuf,
    project_dir: PathBuf,
}

impl VaultPaths {
    /// Discover the standard locations for the current user.
    ///
    /// `$XDG_CONFIG_HOME` and `$XDG_CACHE_HOME` take precedence when they
    /// hold absolute paths; otherwise the platform conventions from the
    /// `dirs` crate apply. The current working directory is the project
    /// directory.
    pub fn discover() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_root = env_dir("XDG_CONFIG_HOME")
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| home_dir.join(".config"));
        let cache_root = env_dir("XDG_CACHE_HOME")
            .or_else(dirs::cache_dir)
            .unwrap_or_else(|| home_dir.join(".cache"));
        let project_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            home_dir,
            cache_root,
            config_dir: config_root.join(APP_DIR),
            project_dir,
        }
    }

    /// Build explicit locations from a config root, cache root, and project
    /// directory.
    pub fn new(
        config_root: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            home_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            cache_root: cache_root.into(),
            config_dir: config_root.into().join(APP_DIR),
            project_dir: project_dir.into(),
        }
    }

    /// Override the home directory used for `$HOME` expansion in settings.
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = home_dir.into();
        self
    }

    /// The user's home directory.
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// The cache root, e.g. `~/.cache`.
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// The application config directory, e.g. `~/.config/isovault`.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The project directory whose local files override global ones.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directory holding drop-in catalog fragments.
    pub fn catalog_fragment_dir(&self) -> PathBuf {
        self.config_dir.join(CATALOG_FRAGMENT_DIR)
    }

    /// Project-local catalog file, the last catalog layer.
    pub fn project_catalog_file(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CATALOG_FILE)
    }

    /// Directory holding drop-in profile fragments.
    pub fn profile_fragment_dir(&self) -> PathBuf {
        self.config_dir.join(PROFILE_FRAGMENT_DIR)
    }

    /// Project-local profile file, the last profile layer.
    pub fn project_profile_file(&self) -> PathBuf {
        self.project_dir.join(PROJECT_PROFILE_FILE)
    }

    /// Global settings file.
    pub fn global_settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Project-local settings file, overriding the global one.
    pub fn project_settings_file(&self) -> PathBuf {
        self.project_dir.join(SETTINGS_FILE)
    }

    /// Default image directory when no `iso.iso_dir` setting is present.
    pub fn default_iso_dir(&self) -> PathBuf {
        self.cache_root.join(APP_DIR).join("isos")
    }
}

/// Absolute path from an environment variable, if set.
fn env_dir(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> VaultPaths {
        VaultPaths::new("/home/user/.config", "/home/user/.cache", "/work/project")
            .with_home_dir("/home/user")
    }

    #[test]
    fn test_config_dir_gets_app_suffix() {
        assert_eq!(
            paths().config_dir(),
            Path::new("/home/user/.config/isovault")
        );
    }

    #[test]
    fn test_catalog_layers() {
        let paths = paths();
        assert_eq!(
            paths.catalog_fragment_dir(),
            PathBuf::from("/home/user/.config/isovault/isos.d")
        );
        assert_eq!(
            paths.project_catalog_file(),
            PathBuf::from("/work/project/isos.yml")
        );
    }

    #[test]
    fn test_profile_layers() {
        let paths = paths();
        assert_eq!(
            paths.profile_fragment_dir(),
            PathBuf::from("/home/user/.config/isovault/profiles.d")
        );
        assert_eq!(
            paths.project_profile_file(),
            PathBuf::from("/work/project/profiles.yml")
        );
    }

    #[test]
    fn test_settings_files() {
        let paths = paths();
        assert_eq!(
            paths.global_settings_file(),
            PathBuf::from("/home/user/.config/isovault/isovault.yml")
        );
        assert_eq!(
            paths.project_settings_file(),
            PathBuf::from("/work/project/isovault.yml")
        );
    }

    #[test]
    fn test_default_iso_dir_lives_under_cache() {
        assert_eq!(
            paths().default_iso_dir(),
            PathBuf::from("/home/user/.cache/isovault/isos")
        );
    }

    #[test]
    fn test_home_dir_override() {
        assert_eq!(paths().home_dir(), Path::new("/home/user"));
    }
}
