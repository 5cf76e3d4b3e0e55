//! Profile management CLI commands.
//!
//! Provides `profile list`, `profile show`, and `profile add` commands for
//! working with installation profiles layered from `profiles.d/` fragments
//! and the project-level `profiles.yml`.

use clap::Subcommand;
use tracing::debug;

use isovault::{ProfileManager, ProfileStore, VaultPaths};

use crate::console::{ConsoleInteraction, ConsoleOutput};
use crate::error::CliError;

/// Profile subcommands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// List profiles
    #[command(alias = "ls")]
    List {
        /// Show hostname and username columns
        #[arg(short, long)]
        long: bool,
    },

    /// Show a profile with inherited defaults applied
    Show {
        /// Profile name
        name: String,
    },

    /// Interactively add a new profile
    Add,
}

/// Run a profile subcommand.
pub fn run(command: ProfileCommands) -> Result<(), CliError> {
    match command {
        ProfileCommands::List { long } => run_list(long),
        ProfileCommands::Show { name } => run_show(&name),
        ProfileCommands::Add => run_add(),
    }
}

/// List profile names.
fn run_list(long: bool) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_profiles(&output, &interaction);

    manager.list(long);
    Ok(())
}

/// Show a resolved profile.
fn run_show(name: &str) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_profiles(&output, &interaction);

    manager.show(name);
    Ok(())
}

/// Interactively create a profile fragment.
fn run_add() -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_profiles(&output, &interaction);

    manager.add()?;
    Ok(())
}

/// Load the profile store and build a manager over console seams.
fn open_profiles<'a>(
    output: &'a ConsoleOutput,
    interaction: &'a ConsoleInteraction,
) -> ProfileManager<'a> {
    let paths = VaultPaths::discover();
    debug!(config_dir = %paths.config_dir().display(), "Using configuration directory");

    let store = ProfileStore::load(&paths);
    ProfileManager::new(store, output, interaction)
}
