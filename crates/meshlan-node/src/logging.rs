//! Tracing subscriber configuration for meshlan nodes.
//!
//! Log levels follow these conventions:
//! - ERROR: unrecoverable failures
//! - WARN: recoverable errors, failed frame emissions
//! - INFO: lifecycle events (startup, shutdown, port attachment)
//! - DEBUG: port registration, dispatch outcomes
//! - TRACE: per-frame routing decisions and drops

use tracing_subscriber::EnvFilter;

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the tracing subscriber.
///
/// The `RUST_LOG` environment variable overrides `default_level`, which
/// normally comes from the `[logging]` config section.
pub fn init(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .init();
}

/// Initialize the tracing subscriber with JSON output.
///
/// Useful for structured logging in containerized environments.
/// Activated by setting `RUST_LOG_FORMAT=json`.
pub fn init_json(default_level: &str) {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter(default_level))
        .init();
}

/// Initialize the tracing subscriber for tests.
///
/// Uses `try_init` to avoid panicking if called multiple times.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("debug"))
        .with_test_writer()
        .try_init();
}
