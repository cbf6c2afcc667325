//! In-memory transport and connection doubles for builder tests.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_nats::Event;
use async_trait::async_trait;

use super::connection::{ConnHandler, Connection, LifecycleHandlers};
use super::transport::Transport;
use super::NatsConfig;

pub struct FakeConnection {
    url: String,
    connected: AtomicBool,
    handlers: LifecycleHandlers,
    closed_set: AtomicBool,
    reconnect_set: AtomicBool,
}

impl std::fmt::Debug for FakeConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeConnection")
            .field("url", &self.url)
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl FakeConnection {
    pub fn new(url: &str, connected: bool) -> Self {
        Self {
            url: url.to_string(),
            connected: AtomicBool::new(connected),
            handlers: LifecycleHandlers::new(),
            closed_set: AtomicBool::new(false),
            reconnect_set: AtomicBool::new(false),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn close(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.handlers.dispatch(&Event::Closed);
    }

    pub fn has_closed_handler(&self) -> bool {
        self.closed_set.load(Ordering::SeqCst)
    }

    pub fn has_reconnect_handler(&self) -> bool {
        self.reconnect_set.load(Ordering::SeqCst)
    }
}

impl Connection for FakeConnection {
    type Session = String;

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn set_closed_handler(&self, handler: ConnHandler) {
        self.closed_set.store(true, Ordering::SeqCst);
        self.handlers.set_closed(handler);
    }

    fn set_reconnect_handler(&self, handler: ConnHandler) {
        self.reconnect_set.store(true, Ordering::SeqCst);
        self.handlers.set_reconnect(handler);
    }

    fn jetstream(&self) -> String {
        format!("jetstream@{}", self.url)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Live,
    NotLive,
    Refused,
}

#[derive(Clone)]
pub struct FakeTransport {
    outcome: Outcome,
    calls: Arc<AtomicU32>,
    last_max_reconnects: Arc<Mutex<Option<Option<usize>>>>,
}

impl FakeTransport {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicU32::new(0)),
            last_max_reconnects: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_max_reconnects(&self) -> Option<Option<usize>> {
        *self.last_max_reconnects.lock().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    type Connection = FakeConnection;
    type Error = std::io::Error;

    async fn connect(&self, config: &NatsConfig) -> Result<FakeConnection, std::io::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_max_reconnects.lock().unwrap() = Some(config.max_reconnects);

        match self.outcome {
            Outcome::Live => Ok(FakeConnection::new(&config.url, true)),
            Outcome::NotLive => Ok(FakeConnection::new(&config.url, false)),
            Outcome::Refused => Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        }
    }
}

#[test]
fn test_fake_connection_session_names_its_url() {
    let conn = FakeConnection::new("nats://fake:4222", true);
    assert_eq!(conn.jetstream(), "jetstream@nats://fake:4222");
}

#[test]
fn test_fake_connection_debug_shows_url_and_liveness() {
    let conn = FakeConnection::new("nats://fake:4222", false);
    let rendered = format!("{:?}", conn);

    assert!(rendered.contains("nats://fake:4222"));
    assert!(rendered.contains("connected: false"));
}
