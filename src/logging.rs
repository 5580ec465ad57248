//! Console logging for the `hangouts` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the process entry point.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a human-readable subscriber writing to stderr.
///
/// `RUST_LOG` overrides `default_filter`. Stdout is left free for command
/// output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_cli(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
}
