use tracing::debug;

use super::Connection;
use crate::common::{BackendError, BackendResult};

/// Check NATS connection health
///
/// Runs the liveness query on an existing handle. Intended for readiness
/// probes; it never dials.
///
/// # Example
/// ```ignore
/// use backend::jetstream::check_health;
///
/// match check_health(&conn) {
///     Ok(_) => StatusCode::OK,
///     Err(_) => StatusCode::SERVICE_UNAVAILABLE,
/// }
/// ```
pub fn check_health<C: Connection>(conn: &C) -> BackendResult<()> {
    if conn.is_connected() {
        debug!("NATS health check passed");
        Ok(())
    } else {
        debug!("NATS health check failed");
        Err(BackendError::NotConnected)
    }
}

/// Health check result for detailed status reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the connection is live
    pub healthy: bool,

    /// Optional error message if unhealthy
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            message: None,
        }
    }

    pub fn unhealthy(message: String) -> Self {
        Self {
            healthy: false,
            message: Some(message),
        }
    }
}

/// Check NATS health with a reportable status
pub fn check_health_detailed<C: Connection>(conn: &C) -> HealthStatus {
    match check_health(conn) {
        Ok(_) => HealthStatus::healthy(),
        Err(e) => HealthStatus::unhealthy(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jetstream::testing::FakeConnection;

    #[test]
    fn test_check_health_live_connection() {
        let conn = FakeConnection::new("nats://fake:4222", true);
        assert!(check_health(&conn).is_ok());
        assert_eq!(check_health_detailed(&conn), HealthStatus::healthy());
    }

    #[test]
    fn test_check_health_dead_connection() {
        let conn = FakeConnection::new("nats://fake:4222", false);
        assert!(matches!(check_health(&conn), Err(BackendError::NotConnected)));

        let status = check_health_detailed(&conn);
        assert!(!status.healthy);
        assert_eq!(status.message.as_deref(), Some("NATS connection is not connected"));
    }
}
