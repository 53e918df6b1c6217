//! CLI entry point for the segmenter.

use rulebook_segmenter::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics are info-level events, so show them unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rulebook_segmenter=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
