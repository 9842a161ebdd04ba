//! Shared helpers for integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Safe to call from every test; the subscriber is installed once. Control
/// verbosity with `RUST_LOG` (e.g., `RUST_LOG=night_owl_storefront=debug`).
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
