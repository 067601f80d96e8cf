//! Test utilities for gomodpin
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by the
//! integration suite.
//!
//! # Example
//!
//! ```rust,no_run
//! use gomodpin::test_utils::{ModFileFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let temp = tempfile::tempdir().unwrap();
//! let path = ModFileFixture::basic().write_to(temp.path()).unwrap();
//! assert!(path.ends_with("go.mod"));
//! ```

pub mod fixtures;

pub use fixtures::ModFileFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
