//! Tracing subscriber setup for binaries.
//!
//! Diagnostics go to stderr so catalog listings on stdout stay scriptable.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// Honours `RUST_LOG` for per-module filtering and falls back to warnings
/// only. Call once at process start.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
