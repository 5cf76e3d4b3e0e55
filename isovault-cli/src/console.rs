//! Console implementations of the library's output and interaction seams.
//!
//! Text goes to stdout. Transfer progress renders as an indicatif bar that
//! is created lazily on the first progress report, once the total size is
//! known.

use std::cell::RefCell;

use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};

use isovault::{EntryStatus, Interaction, Output};

/// Terminal-backed output with a progress bar for transfers.
pub struct ConsoleOutput {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for ConsoleOutput {
    fn line(&self, text: &str) {
        println!("{}", text);
    }

    fn progress(&self, downloaded: u64, total: Option<u64>) {
        let mut bar = self.bar.borrow_mut();
        bar.get_or_insert_with(|| transfer_bar(total))
            .set_position(downloaded);
    }

    fn progress_done(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish();
        }
    }

    fn status_label(&self, status: EntryStatus) -> String {
        let label = status.label();
        match status {
            EntryStatus::Verified => style(label).green().to_string(),
            EntryStatus::Downloaded => style(label).yellow().to_string(),
            EntryStatus::Missing => style(label).red().to_string(),
        }
    }
}

/// Build the progress bar for one transfer.
///
/// A known length gets byte counts with a one-decimal percentage; an
/// unknown length gets a plain running byte counter.
fn transfer_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(length) => {
            let bar_style =
                ProgressStyle::with_template("Progress: {bytes} / {total_bytes} ({percent_exact}%)")
                    .expect("Invalid progress template")
                    .with_key(
                        "percent_exact",
                        |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                            let _ = write!(w, "{:.1}", state.fraction() * 100.0);
                        },
                    );

            let bar = ProgressBar::new(length);
            bar.set_style(bar_style);
            bar
        }
        None => {
            let bar_style = ProgressStyle::with_template("Downloaded: {bytes}")
                .expect("Invalid progress template");

            let bar = ProgressBar::new_spinner();
            bar.set_style(bar_style);
            bar
        }
    }
}

/// Terminal prompts via dialoguer.
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for ConsoleInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn prompt(&self, label: &str) -> String {
        Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default()
    }
}
