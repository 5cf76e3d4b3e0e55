//! CLI error type.

use std::fmt;

use isovault::VaultError;

/// Errors surfaced by CLI command handlers.
#[derive(Debug)]
pub enum CliError {
    /// Missing or conflicting command-line arguments.
    Usage(String),

    /// A library operation failed.
    Vault(VaultError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(message) => write!(f, "{}", message),
            CliError::Vault(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Usage(_) => None,
            CliError::Vault(err) => Some(err),
        }
    }
}

impl From<VaultError> for CliError {
    fn from(err: VaultError) -> Self {
        CliError::Vault(err)
    }
}
