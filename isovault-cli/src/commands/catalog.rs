//! Catalog CLI commands.
//!
//! Handlers for `list`, `download`, `verify`, `add`, and `config`. Each
//! handler builds console seams, opens the catalog manager, and delegates
//! to the library operation.

use crate::commands::open_manager;
use crate::console::{ConsoleInteraction, ConsoleOutput};
use crate::error::CliError;

/// List catalog entries, optionally with size and status columns.
pub fn list(long: bool) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_manager(&output, &interaction)?;

    manager.list(long);
    Ok(())
}

/// Download one ISO by key, or all missing ISOs with `--all`.
pub fn download(iso_key: Option<String>, all: bool, force: bool) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_manager(&output, &interaction)?;

    if all {
        manager.download_all();
        return Ok(());
    }

    match iso_key {
        Some(key) => {
            manager.download(&key, force)?;
            Ok(())
        }
        None => Err(CliError::Usage(
            "Provide an ISO key or use --all flag".to_string(),
        )),
    }
}

/// Verify one downloaded ISO by key, or all downloaded ISOs with `--all`.
pub fn verify(iso_key: Option<String>, all: bool) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_manager(&output, &interaction)?;

    if all {
        manager.verify_all();
        return Ok(());
    }

    match iso_key {
        Some(key) => {
            manager.verify(&key, false)?;
            Ok(())
        }
        None => Err(CliError::Usage(
            "Provide an ISO key or use --all flag".to_string(),
        )),
    }
}

/// Interactively add a new catalog entry.
pub fn add() -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_manager(&output, &interaction)?;

    manager.add()?;
    Ok(())
}

/// Show the effective configuration.
pub fn config() -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction;
    let manager = open_manager(&output, &interaction)?;

    manager.show_config();
    Ok(())
}
