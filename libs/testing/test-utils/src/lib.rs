//! Shared test utilities for backend and controller crates
//!
//! - `TestNats`: JetStream-enabled NATS container with automatic cleanup
//! - `refused_nats_url`: a local URL nothing listens on
//! - `init_test_tracing`: idempotent tracing setup for test output
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestNats;
//!
//! #[tokio::test]
//! async fn my_nats_test() {
//!     let nats = TestNats::new().await;
//!     let url = nats.connection_string();
//! }
//! ```

mod nats;

pub use nats::{TestNats, refused_nats_url};

use core_config::Environment;

/// Initialize tracing for tests (development format, honours `RUST_LOG`).
///
/// Safe to call from every test.
pub fn init_test_tracing() {
    core_config::tracing::init_tracing(&Environment::Development);
}
