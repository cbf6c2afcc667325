//! Messaging backend connection management.
//!
//! This library turns a [`jetstream::NatsConfig`] into a live, verified NATS
//! connection handle. The reconciliation loop that owns the handle calls
//! [`jetstream::Builder::build`] to (re)acquire it and registers lifecycle
//! hooks for close and reconnect events.
//!
//! # Features
//!
//! - `config` (default) - `core_config::FromEnv` support for `NatsConfig`
//!
//! # Example
//!
//! ```ignore
//! use backend::jetstream::{Builder, Connection, ConnectionBuilder, NatsConfig};
//! use std::time::Duration;
//!
//! let config = NatsConfig::new("nats://127.0.0.1:4222")
//!     .with_max_reconnects(Some(5))
//!     .with_reconnect_wait(Duration::from_millis(500));
//!
//! let conn = ConnectionBuilder::new(config).build().await?;
//! conn.set_closed_handler(Box::new(|| tracing::warn!("NATS connection closed")));
//! conn.set_reconnect_handler(Box::new(|| tracing::info!("NATS reconnected")));
//!
//! let js = conn.jetstream();
//! ```
//!
//! `build` resolves only once the connection is verified live or the configured
//! retry budget is exhausted. Wrap it in `tokio::time::timeout` when an earlier
//! deadline is needed.

pub mod common;
pub mod jetstream;

pub use common::{BackendError, BackendResult, BoxError};
