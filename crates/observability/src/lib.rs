//! Tracing/logging setup shared by certforge binaries and tests.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing_setup::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing_setup;
