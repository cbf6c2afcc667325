//! Reconciliation error classification.
//!
//! A reconcile step tags an expected, ignorable failure (resource already
//! deleted, nothing to do) with [`Skippable`]. The loop's final error handling
//! asks [`is_skippable`] whether to stop quietly or to log and requeue.
//!
//! Skippability is a property of the outermost error only:
//!
//! ```
//! use reconcile::{is_skippable, make_skippable, Skippable};
//!
//! let skipped = make_skippable(Some("subscription already deleted".into()));
//! assert!(is_skippable(Some(&*skipped)));
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("failed to sync subscription")]
//! struct SyncError(#[source] Skippable);
//!
//! let annotated = SyncError(Skippable::new(None));
//! assert!(!is_skippable(Some(&annotated)));
//! ```

mod error;
mod outcome;

pub use error::{is_skippable, make_skippable, BoxError, Skippable};
pub use outcome::suppress_skippable;
