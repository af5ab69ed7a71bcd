pub mod config;
pub mod launcher;
pub mod profile;
pub mod resolver;
pub mod transcript;
pub mod turn;
pub mod ui;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never interleave with the transcript.
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
