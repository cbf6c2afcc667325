use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::transport::{NatsTransport, Transport};
use super::{Connection, NatsConfig, NatsConnection};
use crate::common::{BackendError, BackendResult};

/// Produces a live, verified connection or fails with [`BackendError::Connect`]
#[async_trait]
pub trait Builder: Send + Sync {
    type Connection: Connection;

    async fn build(&self) -> BackendResult<Self::Connection>;
}

/// Builds NATS connections from an immutable [`NatsConfig`]
///
/// No lifecycle handlers are registered on the returned handle; callers that
/// want close/reconnect notifications register them after `build`.
#[derive(Debug, Clone)]
pub struct ConnectionBuilder<T = NatsTransport> {
    config: NatsConfig,
    transport: T,
}

impl ConnectionBuilder<NatsTransport> {
    pub fn new(config: NatsConfig) -> Self {
        Self::with_transport(config, NatsTransport)
    }
}

impl<T: Transport> ConnectionBuilder<T> {
    /// Use a custom transport (fakes in tests, alternative dialers)
    pub fn with_transport(config: NatsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &NatsConfig {
        &self.config
    }
}

#[async_trait]
impl<T: Transport> Builder for ConnectionBuilder<T> {
    type Connection = T::Connection;

    /// Connect, then verify liveness. A successful return from the transport
    /// alone is not accepted; the handle must also report itself connected.
    #[instrument(skip(self))]
    async fn build(&self) -> BackendResult<T::Connection> {
        let max_total_wait = self.config.reconnect_policy().max_total_wait();
        info!(
            url = %self.config.url,
            max_reconnects = ?self.config.max_reconnects,
            reconnect_wait_ms = self.config.reconnect_wait.as_millis() as u64,
            max_total_wait_ms = ?max_total_wait.map(|d| d.as_millis() as u64),
            client_name = %self.config.client_name,
            "Connecting to NATS"
        );

        match self.transport.connect(&self.config).await {
            Ok(conn) if conn.is_connected() => {
                info!("Successfully connected to NATS");
                Ok(conn)
            }
            Ok(_) => {
                warn!("NATS transport returned a connection that is not connected");
                Err(BackendError::Connect {
                    url: self.config.url.clone(),
                    source: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Failed to connect to NATS");
                Err(BackendError::Connect {
                    url: self.config.url.clone(),
                    source: Some(Box::new(e)),
                })
            }
        }
    }
}

/// Connect using a NatsConfig
///
/// # Example
/// ```ignore
/// use backend::jetstream::{NatsConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let conn = connect_from_config(NatsConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: NatsConfig) -> BackendResult<NatsConnection> {
    ConnectionBuilder::new(config).build().await
}
