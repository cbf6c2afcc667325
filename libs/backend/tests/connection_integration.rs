//! Integration tests for the NATS connection builder.
//!
//! Tests against a live broker need Docker and are ignored by default:
//! `cargo test -p backend -- --ignored`

use std::error::Error;
use std::time::{Duration, Instant};

use backend::jetstream::{Builder, Connection, ConnectionBuilder, NatsConfig, check_health};
use test_utils::{TestNats, init_test_tracing, refused_nats_url};

#[tokio::test]
async fn test_build_against_refused_endpoint_fails_within_bound() {
    init_test_tracing();

    let wait = Duration::from_millis(50);
    let config = NatsConfig::new(refused_nats_url())
        .with_max_reconnects(Some(2))
        .with_reconnect_wait(wait);

    let start = Instant::now();
    let result = ConnectionBuilder::new(config).build().await;
    let elapsed = start.elapsed();

    let err = result.unwrap_err();
    assert!(err.is_connect());
    assert!(err.source().is_some(), "transport cause should be kept");

    // Two waits between three dials, plus dial time.
    assert!(elapsed >= wait * 2, "returned too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(10), "retry was not bounded: {:?}", elapsed);
}

#[tokio::test]
async fn test_build_with_zero_reconnects_fails_fast() {
    let config = NatsConfig::new(refused_nats_url())
        .with_max_reconnects(Some(0))
        .with_reconnect_wait(Duration::from_secs(30));

    let result = tokio::time::timeout(Duration::from_secs(10), ConnectionBuilder::new(config).build())
        .await
        .expect("a single refused dial should not wait out the reconnect interval");

    assert!(result.unwrap_err().is_connect());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_build_against_live_broker() {
    init_test_tracing();
    let nats = TestNats::new().await;

    let config = NatsConfig::new(nats.connection_string()).with_client_name("integration-test");
    let conn = ConnectionBuilder::new(config).build().await.unwrap();

    assert!(conn.is_connected());
    assert!(check_health(&conn).is_ok());

    let js = conn.jetstream();
    js.create_stream(async_nats::jetstream::stream::Config {
        name: "BUILDER_TEST".to_string(),
        subjects: vec!["builder.>".to_string()],
        ..Default::default()
    })
    .await
    .expect("Failed to create stream");

    let ack = js
        .publish("builder.hello", "world".into())
        .await
        .expect("Failed to publish")
        .await
        .expect("Failed to get ack");
    assert_eq!(ack.stream, "BUILDER_TEST");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_builds_return_independent_handles() {
    let first = TestNats::new().await;
    let second = TestNats::new().await;

    let a = ConnectionBuilder::new(NatsConfig::new(first.connection_string()).with_client_name("a"));
    let b = ConnectionBuilder::new(NatsConfig::new(second.connection_string()).with_client_name("b"));

    let (conn_a, conn_b) = tokio::join!(a.build(), b.build());
    let (conn_a, conn_b) = (conn_a.unwrap(), conn_b.unwrap());

    assert!(conn_a.is_connected());
    assert!(conn_b.is_connected());

    drop(conn_a);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(conn_b.is_connected());
}
