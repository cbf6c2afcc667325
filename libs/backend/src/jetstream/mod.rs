//! NATS connection builder and lifecycle hooks
//!
//! Provides the connect-with-retry contract and the connection capability set
//! consumed by stream-management code.

mod builder;
mod config;
mod connection;
mod health;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{Builder, ConnectionBuilder, connect_from_config};
pub use config::{DEFAULT_CLIENT_NAME, NatsConfig};
pub use connection::{ConnHandler, Connection, LifecycleHandlers, NatsConnection};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use transport::{NatsTransport, Transport};

// Re-export async-nats types for convenience
pub use async_nats::jetstream::Context as JetStreamContext;
pub use async_nats::{Client, ConnectError};
