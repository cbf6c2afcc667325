use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of reconnect attempts after the initial connect
pub const DEFAULT_MAX_RECONNECTS: usize = 10;

/// Default wait between reconnect attempts
pub const DEFAULT_RECONNECT_WAIT: Duration = Duration::from_secs(1);

/// Bounded, fixed-interval reconnect policy
///
/// One initial attempt is always made. After a failure, up to `max_reconnects`
/// further attempts follow, each preceded by `reconnect_wait`. `None` means
/// the attempts never run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Maximum number of reconnect attempts; `None` is unbounded
    pub max_reconnects: Option<usize>,

    /// Delay between attempts
    pub reconnect_wait: Duration,
}

impl ReconnectPolicy {
    /// Create a reconnect policy with defaults
    ///
    /// Defaults:
    /// - max_reconnects: 10
    /// - reconnect_wait: 1s
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of reconnect attempts
    pub fn with_max_reconnects(mut self, max_reconnects: Option<usize>) -> Self {
        self.max_reconnects = max_reconnects;
        self
    }

    /// Set the wait between attempts
    pub fn with_reconnect_wait(mut self, wait: Duration) -> Self {
        self.reconnect_wait = wait;
        self
    }

    /// Upper bound on total time spent waiting between attempts.
    ///
    /// Returns `None` for an unbounded policy.
    pub fn max_total_wait(&self) -> Option<Duration> {
        self.max_reconnects.map(|max| {
            self.reconnect_wait
                .saturating_mul(u32::try_from(max).unwrap_or(u32::MAX))
        })
    }

    /// Whether another attempt is allowed after `reconnects` retries so far
    pub fn allows(&self, reconnects: usize) -> bool {
        self.max_reconnects.is_none_or(|max| reconnects < max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_reconnects: Some(DEFAULT_MAX_RECONNECTS),
            reconnect_wait: DEFAULT_RECONNECT_WAIT,
        }
    }
}

/// Retry an async operation with a fixed wait until it succeeds or the policy
/// is exhausted
///
/// The last error is returned once no attempts remain. The future resolves
/// only at a terminal outcome; drop it to cancel.
///
/// # Example
/// ```ignore
/// use backend::common::{ReconnectPolicy, retry_with_wait};
///
/// let policy = ReconnectPolicy::new().with_max_reconnects(Some(5));
/// let client = retry_with_wait(|| async_nats::connect(url), &policy).await?;
/// ```
pub async fn retry_with_wait<F, Fut, T, E>(mut operation: F, policy: &ReconnectPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut reconnects = 0usize;

    loop {
        match operation().await {
            Ok(result) => {
                if reconnects > 0 {
                    debug!(reconnects, "Operation succeeded after retries");
                }
                return Ok(result);
            }
            Err(e) => {
                if !policy.allows(reconnects) {
                    warn!(attempts = reconnects + 1, error = %e, "Giving up after exhausting reconnect attempts");
                    return Err(e);
                }

                reconnects += 1;
                debug!(
                    attempt = reconnects,
                    max_reconnects = ?policy.max_reconnects,
                    wait_ms = policy.reconnect_wait.as_millis() as u64,
                    error = %e,
                    "Attempt failed, waiting before next attempt"
                );

                tokio::time::sleep(policy.reconnect_wait).await;
            }
        }
    }
}
