//! Diagnostic logging for the CLI.
//!
//! Engine events (rejected generation attempts, finished recordings) go
//! through `tracing`; this installs the subscriber that prints them. Output
//! goes to stderr so stdout stays clean for JSON.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Reads `RUST_LOG`, defaulting to `warn`.
///
/// ```bash
/// RUST_LOG=algotrace_engine=debug algotrace generate --width 20 --height 10 --density 0.4
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
