// src/logging.rs
// =============================================================================
// Sets up diagnostic logging with `tracing`.
//
// Logs go to stderr so stdout only ever holds the report (and stays valid
// JSON with --json). RUST_LOG overrides the level picked from --verbose.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logger(verbose: bool) {
    let default_directive = if verbose {
        "md_link_checker=debug"
    } else {
        "md_link_checker=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init: a second call (e.g. from tests) leaves the first subscriber in place
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
