use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

use crate::common::ReconnectPolicy;
use crate::common::retry::{DEFAULT_MAX_RECONNECTS, DEFAULT_RECONNECT_WAIT};

/// Client name announced to the NATS server when none is configured
pub const DEFAULT_CLIENT_NAME: &str = "eventing-controller";

/// NATS connection configuration
///
/// Immutable input to a single build attempt. It can be constructed manually
/// or loaded from environment variables (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use backend::jetstream::NatsConfig;
/// use std::time::Duration;
///
/// let config = NatsConfig::new("nats://127.0.0.1:4222")
///     .with_max_reconnects(Some(3))
///     .with_reconnect_wait(Duration::from_millis(200));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NatsConfig {
    /// NATS server URL (required)
    pub url: String,

    /// Reconnect attempts after the first failed connect; `None` is unbounded
    ///
    /// The same bound applies to the client's automatic reconnects once
    /// connected, except that `Some(0)` is raised to a single background
    /// reconnect attempt there.
    pub max_reconnects: Option<usize>,

    /// Wait between reconnect attempts
    pub reconnect_wait: Duration,

    /// Informational client name sent to the server
    pub client_name: String,
}

impl NatsConfig {
    /// Create a NatsConfig with default retry bounds
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_reconnects(mut self, max_reconnects: Option<usize>) -> Self {
        self.max_reconnects = max_reconnects;
        self
    }

    pub fn with_reconnect_wait(mut self, wait: Duration) -> Self {
        self.reconnect_wait = wait;
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Retry bounds shared by the initial connect and later automatic reconnects
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::new()
            .with_max_reconnects(self.max_reconnects)
            .with_reconnect_wait(self.reconnect_wait)
    }

    /// Get a reference to the NATS URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: "nats://127.0.0.1:4222".to_string(),
            max_reconnects: Some(DEFAULT_MAX_RECONNECTS),
            reconnect_wait: DEFAULT_RECONNECT_WAIT,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }
}

/// Load NatsConfig from environment variables
///
/// Environment variables:
/// - `NATS_URL` (required) - NATS server URL
/// - `NATS_MAX_RECONNECTS` (optional, default 10) - negative means unbounded
/// - `NATS_RECONNECT_WAIT_MS` (optional, default 1000) - wait between attempts
/// - `NATS_CLIENT_NAME` (optional) - client name sent to the server
#[cfg(feature = "config")]
impl FromEnv for NatsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("NATS_URL")?;

        let max_reconnects: i64 = env_parse_or("NATS_MAX_RECONNECTS", DEFAULT_MAX_RECONNECTS as i64)?;
        let max_reconnects = usize::try_from(max_reconnects).ok();

        let wait_ms: u64 = env_parse_or(
            "NATS_RECONNECT_WAIT_MS",
            DEFAULT_RECONNECT_WAIT.as_millis() as u64,
        )?;

        let client_name = env_or_default("NATS_CLIENT_NAME", DEFAULT_CLIENT_NAME);

        Ok(Self {
            url,
            max_reconnects,
            reconnect_wait: Duration::from_millis(wait_ms),
            client_name,
        })
    }
}
