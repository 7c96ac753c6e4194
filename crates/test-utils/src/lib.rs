//! Fakes and builders shared by the wingbridge integration tests.

pub mod builders;
pub mod fake_enumerator;
pub mod fake_host;
pub mod fake_runner;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Output goes through `with_test_writer()`, so it only shows up for failing
/// tests unless run with `-- --nocapture`.
///
/// The filter comes from `WINGBRIDGE_LOG`, then `RUST_LOG`, then `info`:
/// `WINGBRIDGE_LOG=wingbridge=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("WINGBRIDGE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // Another harness may already have installed a subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
