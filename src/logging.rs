//! Tracing subscriber setup for the server binary.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact fmt subscriber writing to stdout.
///
/// Respects `RUST_LOG`; falls back to `info,tower_http=info`. Calling it twice
/// is harmless.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
