//! Final error-handling step of a reconcile pass.

use tracing::{debug, error};

use crate::error::{is_skippable, BoxError};

/// Decide whether a reconcile result should surface.
///
/// - `Ok(v)` → `Ok(Some(v))`
/// - skippable error → `Ok(None)`, logged at debug level only
/// - any other error → returned unchanged for the caller to requeue
pub fn suppress_skippable<T>(result: Result<T, BoxError>) -> Result<Option<T>, BoxError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if is_skippable(Some(&*err)) => {
            debug!(error = %err, "Skipping reconciliation error");
            Ok(None)
        }
        Err(err) => {
            error!(error = %err, "Reconciliation failed");
            Err(err)
        }
    }
}
