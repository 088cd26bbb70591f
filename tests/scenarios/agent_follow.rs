//! Client side: a following agent regenerates once per change and keeps
//! its checkpoint in step with the server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use schema_sync::infrastructure::FileCheckpointStore;
use schema_sync::{
    follow, AgentEvent, AgentOptions, Backoff, Fingerprint, FollowOptions, SyncAgent,
};

use crate::common::{wait_until, RecordingGenerator, TestServer, DEADLINE};

struct Client {
    dir: TempDir,
    generator: RecordingGenerator,
    agent: SyncAgent<FileCheckpointStore, RecordingGenerator>,
    events: Arc<Mutex<Vec<AgentEvent>>>,
}

impl Client {
    fn new() -> Self {
        Self::in_dir(tempfile::tempdir().unwrap())
    }

    fn in_dir(dir: TempDir) -> Self {
        Self::with_generator(dir, RecordingGenerator::default())
    }

    fn with_generator(dir: TempDir, generator: RecordingGenerator) -> Self {
        let output_dir = dir.path().join("src/client");
        let agent = SyncAgent::new(
            AgentOptions {
                staging_path: dir.path().join("staging/openapi.yaml"),
                output_dir: output_dir.clone(),
            },
            FileCheckpointStore::in_output_dir(&output_dir),
            generator.clone(),
        );
        Self {
            dir,
            generator,
            agent,
            events: Arc::default(),
        }
    }

    fn options(url: String) -> FollowOptions {
        FollowOptions {
            url,
            backoff: Backoff::new(Duration::from_millis(20), Duration::from_millis(100)),
        }
    }

    fn checkpoint(&self) -> String {
        std::fs::read_to_string(self.agent.checkpoint().path()).unwrap()
    }

    fn count(&self, matches: impl Fn(&AgentEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    /// Follow `url` while `script` runs, then shut the agent down.
    async fn follow_while<Fut>(&self, url: String, script: Fut)
    where
        Fut: std::future::Future<Output = ()>,
    {
        let shutdown = CancellationToken::new();
        let recorder = self.events.clone();
        let agent = follow(&self.agent, Self::options(url), shutdown.clone(), move |event| {
            recorder.lock().unwrap().push(event)
        });
        let driver = async {
            script.await;
            shutdown.cancel();
        };

        tokio::time::timeout(DEADLINE * 2, async { tokio::join!(agent, driver) })
            .await
            .expect("scenario did not finish");
    }
}

#[tokio::test]
async fn scenario_first_sync_generates_and_writes_checkpoint() {
    let server = TestServer::start(b"v1").await;
    let client = Client::new();

    client
        .follow_while(server.url(), async {
            wait_until("first generation", || client.generator.count() == 1).await;
        })
        .await;

    assert_eq!(client.generator.runs(), vec![b"v1".to_vec()]);
    assert_eq!(client.checkpoint(), Fingerprint::of(b"v1").as_str());
    assert!(client.dir.path().join("src/client/client.ts").exists());
    assert_eq!(client.count(|e| matches!(e, AgentEvent::Shutdown)), 1);
    server.stop().await;
}

#[tokio::test]
async fn scenario_schema_change_regenerates_once() {
    let server = TestServer::start(b"v1").await;
    let client = Client::new();

    client
        .follow_while(server.url(), async {
            wait_until("first generation", || client.generator.count() == 1).await;
            server.update(b"v2");
            wait_until("second generation", || client.generator.count() == 2).await;
            // A no-op touch afterwards must not regenerate.
            server.update(b"v2");
            tokio::time::sleep(Duration::from_millis(200)).await;
        })
        .await;

    assert_eq!(
        client.generator.runs(),
        vec![b"v1".to_vec(), b"v2".to_vec()]
    );
    assert_eq!(client.checkpoint(), Fingerprint::of(b"v2").as_str());
    server.stop().await;
}

#[tokio::test]
async fn scenario_restarted_agent_skips_known_schema() {
    let server = TestServer::start(b"v1").await;
    let first = Client::new();
    first
        .follow_while(server.url(), async {
            wait_until("first generation", || first.generator.count() == 1).await;
        })
        .await;

    // Same output directory, so the checkpoint is shared with the first run.
    let second = Client::in_dir(first.dir);
    second
        .follow_while(server.url(), async {
            wait_until("no-change", || {
                second.count(|e| matches!(e, AgentEvent::NoChange { .. })) == 1
            })
            .await;
        })
        .await;

    assert_eq!(second.generator.count(), 0);
    server.stop().await;
}

#[tokio::test]
async fn scenario_agent_reconnects_after_server_restart() {
    let server = TestServer::start(b"v1").await;
    let url = server.url();
    let addr = server.addr;
    let client = Client::new();

    client
        .follow_while(url, async {
            wait_until("first generation", || client.generator.count() == 1).await;
            server.stop().await;
            wait_until("disconnect", || {
                client.count(|e| matches!(e, AgentEvent::Disconnected { .. })) == 1
            })
            .await;

            let restarted = TestServer::start_on(addr, b"v2").await;
            wait_until("regeneration after reconnect", || {
                client.generator.count() == 2
            })
            .await;
            restarted.stop().await;
        })
        .await;

    assert_eq!(client.checkpoint(), Fingerprint::of(b"v2").as_str());
    assert!(client.count(|e| matches!(e, AgentEvent::Connected { .. })) >= 2);
}

#[tokio::test]
async fn scenario_shutdown_waits_for_running_generation() {
    let server = TestServer::start(b"v1").await;
    let client = Client::with_generator(
        tempfile::tempdir().unwrap(),
        RecordingGenerator::slow(Duration::from_millis(300)),
    );

    client
        .follow_while(server.url(), async {
            wait_until("generation to start", || client.generator.started() == 1).await;
        })
        .await;

    // Shutdown fired mid-run; the run still finished and was recorded.
    assert_eq!(client.generator.runs(), vec![b"v1".to_vec()]);
    assert_eq!(client.checkpoint(), Fingerprint::of(b"v1").as_str());
    let events = client.events.lock().unwrap();
    let completed = events
        .iter()
        .position(|e| matches!(e, AgentEvent::GenerationComplete { .. }))
        .expect("generation did not complete");
    let shutdown = events
        .iter()
        .position(|e| matches!(e, AgentEvent::Shutdown))
        .expect("agent did not report shutdown");
    assert!(completed < shutdown);
    drop(events);
    server.stop().await;
}
