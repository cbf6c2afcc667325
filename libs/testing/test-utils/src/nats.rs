//! NATS test infrastructure
//!
//! Provides a `TestNats` helper that creates a NATS container with JetStream for testing.

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::nats::Nats;

/// Test NATS wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
/// JetStream is enabled by default for stream-based testing.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestNats;
///
/// # async fn example() {
/// let nats = TestNats::new().await;
/// let url = nats.connection_string();
/// # }
/// ```
pub struct TestNats {
    #[allow(dead_code)]
    container: ContainerAsync<Nats>,
    pub connection_string: String,
}

impl TestNats {
    /// Create a new test NATS instance with JetStream enabled
    pub async fn new() -> Self {
        let nats_image = Nats::default().with_tag("latest").with_cmd(["-js"]);

        let container = nats_image
            .start()
            .await
            .expect("Failed to start NATS container");

        let host_port = container
            .get_host_port_ipv4(4222)
            .await
            .expect("Failed to get NATS port");

        let connection_string = format!("nats://127.0.0.1:{}", host_port);

        tracing::info!(port = host_port, "Test NATS ready with JetStream");

        Self {
            container,
            connection_string,
        }
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestNats {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test NATS container");
    }
}

/// A NATS URL on a local port nothing is listening on.
///
/// Binds an ephemeral port and releases it, so dials are refused immediately.
pub fn refused_nats_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("Failed to read local addr").port();
    drop(listener);
    format!("nats://127.0.0.1:{}", port)
}
