//! Tracing initialization for the CLI
//!
//! Logs go to stderr so command output stays pipeable. `RUST_LOG`
//! overrides the defaults; the `--cli` flag raises the crate's filter
//! so per-page crawl events are surfaced inline.

use tracing_subscriber::EnvFilter;

pub fn init_tracing_subscriber(verbose: bool) {
    let default_filter = if verbose {
        "warn,assay=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
