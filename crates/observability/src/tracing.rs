//! Tracing/logging initialization.
//!
//! JSON lines with timestamps. The filter comes from `RUST_LOG`, falling back
//! to a caller-supplied default directive.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    try_init_with_default(DEFAULT_DIRECTIVE);
}

/// Install the global subscriber with `default_directive` as the fallback
/// filter. Returns `false` if a global subscriber was already installed.
pub fn try_init_with_default(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok()
}
