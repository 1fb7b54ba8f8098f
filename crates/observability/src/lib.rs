//! Process-wide tracing/logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Filter via `RUST_LOG` (default `info`). `GATEKEY_LOG_FORMAT=text` switches
/// from JSON lines to human-readable output for local development. Safe to
/// call multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let text = std::env::var("GATEKEY_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("text"));
    let _ = if text {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
}
