//! Skippable error marker.

use std::error::Error;
use std::fmt;

/// Boxed, thread-safe error passed along the reconcile path.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Marks an error as "do not treat as a reconciliation failure".
///
/// Wraps exactly one cause, which may be absent: a `Skippable` without a
/// cause means nothing went wrong but the step should stop here. Wrapping an
/// already skippable error nests it; the inner value is kept unchanged.
#[derive(Debug)]
pub struct Skippable {
    cause: Option<BoxError>,
}

impl fmt::Display for Skippable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "skippable error: {}", cause),
            None => write!(f, "skippable error"),
        }
    }
}

impl Error for Skippable {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl Skippable {
    pub fn new(cause: Option<BoxError>) -> Self {
        Self { cause }
    }

    /// The wrapped cause, one level down.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Unwrap one level, handing back the original cause.
    pub fn into_cause(self) -> Option<BoxError> {
        self.cause
    }
}

/// Wrap `cause` as skippable. Never fails and always returns an error value,
/// even for an absent cause.
pub fn make_skippable(cause: Option<BoxError>) -> BoxError {
    Box::new(Skippable::new(cause))
}

/// Whether `err` should be absorbed instead of surfaced.
///
/// - `None` → `true`
/// - outermost error is [`Skippable`] → `true`, whatever it wraps
/// - anything else → `false`, even if a `Skippable` sits further down the
///   source chain
///
/// Only the outermost value is inspected. Annotating a skippable error with
/// more context turns it into an unexpected failure.
pub fn is_skippable(err: Option<&(dyn Error + 'static)>) -> bool {
    match err {
        None => true,
        Some(err) => err.is::<Skippable>(),
    }
}
