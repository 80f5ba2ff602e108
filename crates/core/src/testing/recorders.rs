//! Recording implementations of the synchronous collaborators.

use std::sync::Mutex;

use chrono::Utc;

use crate::events::{EventBus, SearchEvent};
use crate::progress::{ProgressKey, ProgressSink};
use crate::results::{ResultStore, ResultStoreError, StoredResult};
use crate::searcher::ReleaseCandidate;

/// Event bus that keeps every published event.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<SearchEvent>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventBus for RecordingEventBus {
    fn publish(&self, event: SearchEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Progress sink that records which counters were started.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    starts: Mutex<Vec<ProgressKey>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starts(&self) -> Vec<ProgressKey> {
        self.starts.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn start(&self, key: ProgressKey) {
        self.starts.lock().unwrap().push(key);
    }

    fn update(&self, _key: ProgressKey, _value: f32, _text: &str) {}

    fn end(&self, _key: ProgressKey) {}
}

/// A call made against a [`RecordingResultStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    DeleteAll,
    Insert {
        items: Vec<ReleaseCandidate>,
        search_title: Option<String>,
        ident: bool,
    },
}

/// In-memory result store that records the order of writes.
#[derive(Debug, Default)]
pub struct RecordingResultStore {
    calls: Mutex<Vec<StoreCall>>,
    rows: Mutex<Vec<StoredResult>>,
}

impl RecordingResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write calls in the order they were made.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ResultStore for RecordingResultStore {
    fn delete_all(&self) -> Result<(), ResultStoreError> {
        self.calls.lock().unwrap().push(StoreCall::DeleteAll);
        self.rows.lock().unwrap().clear();
        Ok(())
    }

    fn insert(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        self.calls.lock().unwrap().push(StoreCall::Insert {
            items: items.to_vec(),
            search_title: search_title.map(str::to_string),
            ident,
        });

        let mut rows = self.rows.lock().unwrap();
        let mut next_id = rows.last().map_or(1, |r| r.id + 1);
        for item in items {
            rows.push(StoredResult {
                id: next_id,
                search_title: search_title.map(str::to_string),
                ident,
                candidate: item.clone(),
                created_at: Utc::now(),
            });
            next_id += 1;
        }
        Ok(())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<StoredResult>, ResultStoreError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    fn get_all(&self) -> Result<Vec<StoredResult>, ResultStoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    fn count(&self) -> Result<i64, ResultStoreError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}
