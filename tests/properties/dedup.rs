//! Property tests for payload deduplication in the sync agent.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;

use schema_sync::domain::ports::{CheckpointStore, GenerationInvoker, GenerationStatus};
use schema_sync::{AgentEvent, AgentOptions, Fingerprint, SchemaSyncResult, SyncAgent};

#[derive(Clone, Default)]
struct MemoryCheckpoint(Arc<Mutex<Option<Fingerprint>>>);

#[async_trait]
impl CheckpointStore for MemoryCheckpoint {
    async fn load(&self) -> SchemaSyncResult<Option<Fingerprint>> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn save(&self, fingerprint: &Fingerprint) -> SchemaSyncResult<()> {
        *self.0.lock().unwrap() = Some(fingerprint.clone());
        Ok(())
    }
}

/// Exits with `code` and counts invocations.
#[derive(Clone, Default)]
struct CountingGenerator {
    code: i32,
    calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl GenerationInvoker for CountingGenerator {
    async fn generate(
        &self,
        _input: &Path,
        _output_dir: &Path,
    ) -> SchemaSyncResult<GenerationStatus> {
        *self.calls.lock().unwrap() += 1;
        Ok(GenerationStatus::exited(self.code))
    }
}

/// Payloads drawn from a tiny alphabet so repeats are common.
fn payloads() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(
        prop_oneof![Just(b"a".to_vec()), Just(b"b".to_vec()), Just(b"c".to_vec())],
        1..=24,
    )
}

/// Feed `payloads` through a fresh agent; returns (invocations, final checkpoint).
fn run(payloads: &[Vec<u8>], code: i32) -> (usize, Option<Fingerprint>) {
    let dir = tempfile::tempdir().unwrap();
    let checkpoint = MemoryCheckpoint::default();
    let generator = CountingGenerator {
        code,
        ..CountingGenerator::default()
    };
    let agent = SyncAgent::new(
        AgentOptions {
            staging_path: dir.path().join("openapi.yaml"),
            output_dir: dir.path().join("out"),
        },
        checkpoint.clone(),
        generator.clone(),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        for payload in payloads {
            agent
                .handle_payload(payload, &|_: AgentEvent| {})
                .await
                .unwrap();
        }
    });

    let calls = *generator.calls.lock().unwrap();
    let last = checkpoint.0.lock().unwrap().clone();
    (calls, last)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The generator runs once per change between consecutive payloads.
    #[test]
    fn property_one_invocation_per_change(payloads in payloads(), code in 0i32..3) {
        let changes = 1 + payloads.windows(2).filter(|w| w[0] != w[1]).count();

        let (calls, _) = run(&payloads, code);

        prop_assert_eq!(calls, changes);
    }

    /// PROPERTY: The checkpoint always ends on the most recent payload.
    #[test]
    fn property_checkpoint_tracks_latest_payload(payloads in payloads(), code in 0i32..3) {
        let (_, last) = run(&payloads, code);

        prop_assert_eq!(last, Some(Fingerprint::of(payloads.last().unwrap())));
    }

    /// PROPERTY: Repeating one payload never invokes the generator twice.
    #[test]
    fn property_repeats_never_regenerate(repeats in 1usize..16) {
        let payloads = vec![b"openapi: 3.0.0".to_vec(); repeats];

        let (calls, _) = run(&payloads, 0);

        prop_assert_eq!(calls, 1);
    }
}
