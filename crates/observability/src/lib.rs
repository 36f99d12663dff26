//! Tracing/logging setup shared by gate embedders.

/// Initialize process-wide observability (tracing/logging).
///
/// Hosts call this once at plugin load; it is safe to call multiple times
/// (subsequent calls become no-ops).
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
