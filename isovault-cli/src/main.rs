//! isovault CLI entry point.
//!
//! Parses the command line and dispatches to the command handlers. All
//! diagnostics go to stderr; command output goes to stdout.

mod commands;
mod console;
mod error;

use std::process;

use clap::{Parser, Subcommand};

use crate::commands::profile::ProfileCommands;
use crate::error::CliError;

/// Download and verify OS installation ISOs from a layered catalog.
#[derive(Debug, Parser)]
#[command(name = "isovault", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// List ISOs in the catalog
    #[command(alias = "ls")]
    List {
        /// Show size and status columns
        #[arg(short, long)]
        long: bool,
    },

    /// Download an ISO by catalog key
    Download {
        /// Catalog key of the ISO
        iso_key: Option<String>,

        /// Download every ISO missing from the ISO directory
        #[arg(short, long)]
        all: bool,

        /// Re-download without asking when the file already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Verify a downloaded ISO against its checksum
    Verify {
        /// Catalog key of the ISO
        iso_key: Option<String>,

        /// Verify every downloaded ISO
        #[arg(short, long)]
        all: bool,
    },

    /// Interactively add a new ISO to the catalog
    Add,

    /// Show the effective configuration
    Config,

    /// Manage installation profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

fn main() {
    isovault::logging::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

/// Dispatch a parsed command to its handler.
fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List { long } => commands::catalog::list(long),
        Commands::Download {
            iso_key,
            all,
            force,
        } => commands::catalog::download(iso_key, all, force),
        Commands::Verify { iso_key, all } => commands::catalog::verify(iso_key, all),
        Commands::Add => commands::catalog::add(),
        Commands::Config => commands::catalog::config(),
        Commands::Profile { command } => commands::profile::run(command),
    }
}
