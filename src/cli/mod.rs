//! Command-line interface for the evaluation strategies.
//! This module is not part of the public library API.

pub mod args;
pub mod commands;

pub use args::GameSearch;

/// Prints `tracing` spans of the instrumented search entry points.
/// Respects `RUST_LOG`; nothing is printed when it is unset.
#[cfg(feature = "instrumentation")]
pub fn init_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .compact()
        .init();
}
