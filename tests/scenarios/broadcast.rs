//! Server side: post-connect send, change broadcast, no-op suppression.

use std::time::Duration;

use schema_sync::infrastructure::SyncClient;
use schema_sync::{Fingerprint, ServerEvent};

use crate::common::{TestServer, DEADLINE};

async fn next(client: &mut SyncClient) -> Vec<u8> {
    tokio::time::timeout(DEADLINE, client.next_payload())
        .await
        .expect("no payload before deadline")
        .unwrap()
        .expect("connection closed")
}

async fn assert_silent(client: &mut SyncClient) {
    let waited = tokio::time::timeout(Duration::from_millis(300), client.next_payload()).await;
    assert!(waited.is_err(), "unexpected message: {:?}", waited);
}

#[tokio::test]
async fn scenario_client_receives_snapshot_on_connect() {
    let server = TestServer::start(b"openapi: 3.0.0\n").await;

    let mut client = SyncClient::connect(&server.url()).await.unwrap();

    assert_eq!(next(&mut client).await, b"openapi: 3.0.0\n");
    server.stop().await;
}

#[tokio::test]
async fn scenario_late_subscriber_gets_current_snapshot() {
    let server = TestServer::start(b"v1").await;
    let mut early = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut early).await, b"v1");

    server.update(b"v2");
    assert_eq!(next(&mut early).await, b"v2");
    server.update(b"v3");
    assert_eq!(next(&mut early).await, b"v3");

    let mut late = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut late).await, b"v3");
    assert_silent(&mut early).await;

    server.stop().await;
}

#[tokio::test]
async fn scenario_change_reaches_every_client_once() {
    let server = TestServer::start(b"v1").await;
    let mut a = SyncClient::connect(&server.url()).await.unwrap();
    let mut b = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut a).await, b"v1");
    assert_eq!(next(&mut b).await, b"v1");

    server.update(b"v2");

    assert_eq!(next(&mut a).await, b"v2");
    assert_eq!(next(&mut b).await, b"v2");
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;

    let fingerprint = Fingerprint::of(b"v2").to_string();
    assert_eq!(
        server.count(|e| matches!(
            e,
            ServerEvent::SchemaChanged { fingerprint: f, delivered: 2, .. } if *f == fingerprint
        )),
        1
    );
    server.stop().await;
}

#[tokio::test]
async fn scenario_noop_touch_is_not_broadcast() {
    let server = TestServer::start(b"v1").await;
    let mut client = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut client).await, b"v1");

    server.update(b"v1");
    server
        .wait_for("no-change event", |e| matches!(e, ServerEvent::NoChange { .. }))
        .await;

    assert_silent(&mut client).await;
    assert_eq!(
        server.count(|e| matches!(e, ServerEvent::SchemaChanged { .. })),
        0
    );
    server.stop().await;
}

#[tokio::test]
async fn scenario_disconnected_client_is_skipped() {
    let server = TestServer::start(b"v1").await;
    let mut gone = SyncClient::connect(&server.url()).await.unwrap();
    let mut stays = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut gone).await, b"v1");
    assert_eq!(next(&mut stays).await, b"v1");

    gone.close().await;
    server
        .wait_for("disconnect", |e| {
            matches!(e, ServerEvent::ClientDisconnected { clients: 1, .. })
        })
        .await;

    server.update(b"v2");

    assert_eq!(next(&mut stays).await, b"v2");
    assert_eq!(
        server.count(|e| matches!(e, ServerEvent::SchemaChanged { delivered: 1, .. })),
        1
    );
    server.stop().await;
}

#[tokio::test]
async fn scenario_shutdown_closes_clients() {
    let server = TestServer::start(b"v1").await;
    let mut client = SyncClient::connect(&server.url()).await.unwrap();
    assert_eq!(next(&mut client).await, b"v1");

    let events = server.events.clone();
    server.stop().await;

    let end = tokio::time::timeout(DEADLINE, client.next_payload())
        .await
        .expect("client not closed before deadline")
        .unwrap();
    assert_eq!(end, None);
    assert!(events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, ServerEvent::Shutdown { closed: 1 })));
}
