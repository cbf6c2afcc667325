use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_nats::Client;
use async_nats::connection::State;
use tracing::{debug, info, warn};

/// Callback invoked on a connection lifecycle change
pub type ConnHandler = Box<dyn Fn() + Send + Sync + 'static>;

type SharedHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Contract for a live broker connection
///
/// Collaborators depend on this capability set rather than on the concrete
/// client, so tests can substitute a fake.
///
/// Registering a handler replaces the previous handler of the same kind.
pub trait Connection: Send + Sync {
    /// Higher-level session produced by [`Connection::jetstream`]
    type Session;

    /// Whether the connection currently considers itself connected
    fn is_connected(&self) -> bool;

    /// Register the callback fired when the transport terminates permanently,
    /// either because the client shut down or the reconnect budget ran out
    fn set_closed_handler(&self, handler: ConnHandler);

    /// Register the callback fired after an automatic reconnect succeeds
    fn set_reconnect_handler(&self, handler: ConnHandler);

    /// Create a stream-management session on top of this connection
    fn jetstream(&self) -> Self::Session;
}

#[derive(Default)]
struct Handlers {
    closed: Option<SharedHandler>,
    reconnect: Option<SharedHandler>,
}

/// Lifecycle callback registry fed by the client's event stream.
///
/// async-nats accepts a single event callback at connect time, so the
/// registry is created first, captured by that callback, and later filled in
/// through the [`Connection`] setters.
#[derive(Default)]
pub struct LifecycleHandlers {
    handlers: Mutex<Handlers>,
    disconnected: AtomicBool,
    closed: AtomicBool,
}

impl LifecycleHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Handlers> {
        // Handlers run outside the lock; a poisoned slot is still usable.
        self.handlers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_closed(&self, handler: ConnHandler) {
        self.lock().closed = Some(Arc::from(handler));
    }

    pub fn set_reconnect(&self, handler: ConnHandler) {
        self.lock().reconnect = Some(Arc::from(handler));
    }

    /// Route a client event to the registered callbacks.
    ///
    /// `Connected` counts as a reconnect only after a `Disconnected` was seen.
    /// The client gives up on reconnecting by reporting
    /// `ClientError::MaxReconnects`; `Closed` is only sent once every client
    /// handle is dropped. Both events terminate the connection. The closed callback fires at most once.
    pub fn dispatch(&self, event: &async_nats::Event) {
        match event {
            async_nats::Event::Disconnected => {
                warn!("NATS connection lost");
                self.disconnected.store(true, Ordering::SeqCst);
            }
            async_nats::Event::Connected => {
                if self.disconnected.swap(false, Ordering::SeqCst) {
                    info!("NATS connection re-established");
                    let handler = self.lock().reconnect.clone();
                    if let Some(handler) = handler {
                        handler();
                    }
                } else {
                    debug!("NATS connection established");
                }
            }
            async_nats::Event::Closed => self.fire_closed("NATS connection closed"),
            async_nats::Event::ClientError(async_nats::ClientError::MaxReconnects) => {
                self.fire_closed("NATS reconnect attempts exhausted, connection closed")
            }
            other => {
                debug!(event = ?other, "NATS client event");
            }
        }
    }

    fn fire_closed(&self, reason: &'static str) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        warn!("{reason}");
        let handler = self.lock().closed.clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

/// [`Connection`] backed by an `async_nats::Client`
#[derive(Clone)]
pub struct NatsConnection {
    client: Client,
    handlers: Arc<LifecycleHandlers>,
}

impl NatsConnection {
    /// Wrap a client whose event callback feeds `handlers`
    pub fn new(client: Client, handlers: Arc<LifecycleHandlers>) -> Self {
        Self { client, handlers }
    }

    /// Get the underlying NATS client for advanced operations
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl std::fmt::Debug for NatsConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsConnection")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl Connection for NatsConnection {
    type Session = async_nats::jetstream::Context;

    fn is_connected(&self) -> bool {
        matches!(self.client.connection_state(), State::Connected)
    }

    fn set_closed_handler(&self, handler: ConnHandler) {
        self.handlers.set_closed(handler);
    }

    fn set_reconnect_handler(&self, handler: ConnHandler) {
        self.handlers.set_reconnect(handler);
    }

    fn jetstream(&self) -> Self::Session {
        async_nats::jetstream::new(self.client.clone())
    }
}
