//! Tracing/logging setup shared by bazaar binaries.

/// Initialize process-wide logging. Repeated calls are no-ops.
pub fn init() {
    tracing::init();
}

pub mod tracing;
