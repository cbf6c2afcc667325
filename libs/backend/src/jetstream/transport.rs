use std::sync::Arc;
use std::time::Duration;

use async_nats::{Client, ConnectError, ConnectOptions};
use async_trait::async_trait;
use tracing::instrument;

use super::NatsConfig;
use super::connection::{Connection, LifecycleHandlers, NatsConnection};
use crate::common::retry_with_wait;

/// Connect primitive used by the builder
///
/// Implementations own the retry: one initial attempt plus up to
/// `config.max_reconnects` further attempts, `config.reconnect_wait` apart.
/// The returned future resolves only at a terminal outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn connect(&self, config: &NatsConfig) -> Result<Self::Connection, Self::Error>;
}

/// [`Transport`] dialing a real NATS server through async-nats
#[derive(Debug, Clone, Copy, Default)]
pub struct NatsTransport;

#[async_trait]
impl Transport for NatsTransport {
    type Connection = NatsConnection;
    type Error = ConnectError;

    #[instrument(skip(self, config), fields(url = %config.url, client_name = %config.client_name))]
    async fn connect(&self, config: &NatsConfig) -> Result<NatsConnection, ConnectError> {
        let handlers = Arc::new(LifecycleHandlers::new());
        let policy = config.reconnect_policy();

        let client = retry_with_wait(|| dial(config, handlers.clone()), &policy).await?;

        Ok(NatsConnection::new(client, handlers))
    }
}

/// Single dial. The same bounds are handed to async-nats for the automatic
/// reconnects it performs once the client is up.
async fn dial(config: &NatsConfig, handlers: Arc<LifecycleHandlers>) -> Result<Client, ConnectError> {
    let wait = config.reconnect_wait;

    ConnectOptions::new()
        .name(&config.client_name)
        .max_reconnects(client_max_reconnects(config.max_reconnects))
        .reconnect_delay_callback(move |attempts| {
            if attempts <= 1 { Duration::ZERO } else { wait }
        })
        .event_callback(move |event| {
            let handlers = handlers.clone();
            async move { handlers.dispatch(&event) }
        })
        .connect(config.url.as_str())
        .await
}

/// Reconnect budget handed to async-nats.
///
/// async-nats reads `Some(0)` as unbounded, so a zero budget is raised to one
/// background reconnect attempt.
fn client_max_reconnects(max_reconnects: Option<usize>) -> Option<usize> {
    max_reconnects.map(|max| max.max(1))
}
