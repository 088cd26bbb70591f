//! Shared helpers for scenario tests.
//!
//! - `TestServer`: a schema server on an ephemeral localhost port, driven by
//!   a manual change trigger instead of the filesystem watcher
//! - `RecordingGenerator`: a generator that records every invocation
//! - `wait_until`: poll a condition with a deadline

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use schema_sync::domain::ports::{GenerationInvoker, GenerationStatus};
use schema_sync::infrastructure::fs::ChangeTrigger;
use schema_sync::infrastructure::{FileSchemaSource, SchemaChanges, SyncChannel};
use schema_sync::{SchemaSyncResult, ServeUseCase, ServerEvent};

/// Upper bound for any single wait in these tests
pub const DEADLINE: Duration = Duration::from_secs(5);

/// Poll `condition` every 10ms until it holds; panics after [`DEADLINE`].
pub async fn wait_until<F>(what: &str, condition: F)
where
    F: Fn() -> bool,
{
    let polled = tokio::time::timeout(DEADLINE, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(polled.is_ok(), "timed out waiting for {what}");
}

pub struct TestServer {
    pub dir: TempDir,
    pub schema: PathBuf,
    pub addr: SocketAddr,
    pub events: Arc<Mutex<Vec<ServerEvent>>>,
    trigger: ChangeTrigger,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(initial: &[u8]) -> Self {
        Self::bind("127.0.0.1:0", initial).await
    }

    /// Start on a fixed address, e.g. the one a stopped server used.
    pub async fn start_on(addr: SocketAddr, initial: &[u8]) -> Self {
        Self::bind(&addr.to_string(), initial).await
    }

    async fn bind(addr: &str, initial: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("openapi.yaml");
        std::fs::write(&schema, initial).unwrap();

        let shutdown = CancellationToken::new();
        let mut channel = SyncChannel::bind(addr, &shutdown).await.unwrap();
        let addr = channel.local_addr();
        let (trigger, changes) = SchemaChanges::manual(Duration::from_millis(10));

        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = events.clone();
        let use_case = ServeUseCase::new(FileSchemaSource::new(&schema));
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            use_case
                .run(&mut channel, changes, token, move |event| {
                    recorder.lock().unwrap().push(event)
                })
                .await;
        });

        Self {
            dir,
            schema,
            addr,
            events,
            trigger,
            shutdown,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Rewrite the schema file and signal a change.
    pub fn update(&self, content: &[u8]) {
        std::fs::write(&self.schema, content).unwrap();
        assert!(self.trigger.notify(), "server stopped watching");
    }

    pub fn count(&self, matches: impl Fn(&ServerEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    pub async fn wait_for(&self, what: &str, matches: impl Fn(&ServerEvent) -> bool) {
        wait_until(what, || self.count(&matches) > 0).await;
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(DEADLINE, self.handle)
            .await
            .expect("server did not shut down")
            .unwrap();
    }
}

/// Generator double that records the staged content of every run.
#[derive(Clone, Default)]
pub struct RecordingGenerator {
    runs: Arc<Mutex<Vec<Vec<u8>>>>,
    started: Arc<AtomicUsize>,
    delay: Duration,
}

impl RecordingGenerator {
    /// Each run takes `delay` before it completes.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Runs that have begun, finished or not
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> Vec<Vec<u8>> {
        self.runs.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationInvoker for RecordingGenerator {
    async fn generate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> SchemaSyncResult<GenerationStatus> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let staged = tokio::fs::read(input).await?;
        tokio::time::sleep(self.delay).await;
        tokio::fs::create_dir_all(output_dir).await?;
        tokio::fs::write(output_dir.join("client.ts"), &staged).await?;
        self.runs.lock().unwrap().push(staged);
        Ok(GenerationStatus::exited(0))
    }
}
