//! Tracing initialisation helpers for tests.
//!
//! The subscriber is initialised at most once per process (idempotent), so
//! these are safe to call from every test function.

use tracing_subscriber::EnvFilter;

/// Initialise a tracing subscriber that writes to the test-harness writer,
/// filtering at `info` unless `RUST_LOG` says otherwise.
///
/// # Example
///
/// ```ignore
/// #[tokio::test]
/// async fn my_test() {
///     scratchlight_test_utils::tracing_setup::init_test_tracing();
///     tracing::info!("visible when RUST_LOG=info");
/// }
/// ```
pub fn init_test_tracing() {
    init_test_tracing_with("info");
}

/// Like [`init_test_tracing`], with an explicit default filter for tests
/// that want chattier output (e.g. `"scratchlight_core=debug"`).
pub fn init_test_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
