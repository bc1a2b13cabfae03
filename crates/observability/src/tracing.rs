//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Fallback directive when `RUST_LOG` is unset: quiet infrastructure, debug
/// detail for the expense core itself.
const DEFAULT_FILTER: &str = "info,rebill_expenses=debug,rebill_report=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize with an explicit fallback filter (tests, embedders).
///
/// `RUST_LOG` still wins when set.
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // JSON logs + timestamps.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
