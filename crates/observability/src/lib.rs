//! Tracing/logging setup shared by every binary and test harness.

/// Tracing configuration (filters, formatters).
pub mod tracing;

/// Initialize process-wide JSON logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize human-readable logging routed through the test harness.
pub fn init_test() {
    tracing::init_test();
}
