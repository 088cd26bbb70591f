//! Property tests for the server-side snapshot cache.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;

use schema_sync::domain::ports::SchemaSource;
use schema_sync::{SchemaSyncResult, SchemaWatcher};

#[derive(Clone, Default)]
struct MemorySource(Arc<Mutex<Vec<u8>>>);

#[async_trait]
impl SchemaSource for MemorySource {
    async fn read(&self) -> SchemaSyncResult<Vec<u8>> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A forced reload reports a change exactly when the content
    /// differs from the previous load, so no-op writes never broadcast.
    #[test]
    fn property_has_changed_iff_content_differs(
        writes in proptest::collection::vec(
            prop_oneof![Just(b"x".to_vec()), Just(b"y".to_vec())],
            1..=20,
        ),
    ) {
        let source = MemorySource::default();
        let mut watcher = SchemaWatcher::new(source.clone());
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let mut previous: Option<Vec<u8>> = None;
        for content in writes {
            *source.0.lock().unwrap() = content.clone();
            let changed = rt
                .block_on(watcher.get_schema(true))
                .unwrap()
                .has_changed();

            prop_assert_eq!(changed, previous.as_ref() != Some(&content));
            previous = Some(content);
        }
    }
}
