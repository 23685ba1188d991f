//! Tracing setup for the `shexec` binary.
//!
//! All log output goes to stderr. Per-command results are logged at `info`,
//! discovery skips at `debug`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level is `debug` with `--debug`
/// and `info` without.
///
/// # Example
/// ```bash
/// RUST_LOG=shexec::io=debug shexec ./units
/// ```
pub fn init(debug: bool) {
    let default_level = if debug { "shexec=debug" } else { "shexec=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
