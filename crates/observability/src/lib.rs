//! Tracing/logging setup shared by the storefront binaries and the browser app.

/// Initialize process-wide tracing for native builds (tests, tools).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing inside the browser, forwarding to the devtools console.
///
/// Safe to call multiple times.
#[cfg(target_arch = "wasm32")]
pub fn init_browser() {
    tracing::init_browser();
}

/// Tracing configuration (filters, layers, writers).
pub mod tracing;
