//! Tracing/logging initialisation.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber filtered by `directives`.
///
/// Falls back to `info` on an unparsable filter. Safe to call more than once;
/// later calls are no-ops.
pub fn init(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
