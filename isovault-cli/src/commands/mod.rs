//! CLI command handlers.

pub mod catalog;
pub mod profile;

use tracing::debug;

use isovault::{CatalogStore, IsoManager, Settings, VaultPaths};

use crate::console::{ConsoleInteraction, ConsoleOutput};
use crate::error::CliError;

/// Load the catalog and settings and build a manager over console seams.
pub(crate) fn open_manager<'a>(
    output: &'a ConsoleOutput,
    interaction: &'a ConsoleInteraction,
) -> Result<IsoManager<'a>, CliError> {
    let paths = VaultPaths::discover();
    debug!(config_dir = %paths.config_dir().display(), "Using configuration directory");

    let store = CatalogStore::load(&paths);
    let settings = Settings::load(&paths);

    Ok(IsoManager::new(store, settings, output, interaction)?)
}
