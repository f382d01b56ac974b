//! Logging setup for the shell.
//!
//! Logs go to stderr so they never interleave with the battle screen on
//! stdout. `RUST_LOG` overrides the level chosen from `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
pub fn init(verbose: bool) {
    let filter_directive = if verbose {
        "warn,bossfight_core=debug,bossfight=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(verbose, "logging initialized");
}
