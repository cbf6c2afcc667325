//! Common utilities shared across backend implementations

pub mod error;
pub mod retry;

pub use error::{BackendError, BackendResult, BoxError};
pub use retry::{ReconnectPolicy, retry_with_wait};
