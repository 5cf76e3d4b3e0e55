//! Terminal-facing seams for catalog operations.
//!
//! The manager talks to the user only through these traits. The CLI wires
//! in console implementations; tests substitute recording fakes.

use super::EntryStatus;

/// Sink for user-facing text and transfer progress.
pub trait Output {
    /// Print one line of output.
    fn line(&self, text: &str);

    /// Report byte progress for the transfer in flight.
    ///
    /// `total` carries the server-declared content length when known.
    fn progress(&self, downloaded: u64, total: Option<u64>);

    /// Mark the transfer in flight as finished.
    fn progress_done(&self);

    /// Render a status word for long listings.
    ///
    /// The default is the plain label; console implementations may color it.
    fn status_label(&self, status: EntryStatus) -> String {
        status.label().to_string()
    }
}

/// Interactive prompts answered by the user.
pub trait Interaction {
    /// Ask a yes/no question. Returns true only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;

    /// Ask for one line of text. Empty when the user just presses enter.
    fn prompt(&self, label: &str) -> String;
}
