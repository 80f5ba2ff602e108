//! Mock metadata service for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::media::MediaDescriptor;
use crate::searcher::{MetadataError, MetadataService};

/// Mock metadata service returning a fixed English title.
#[derive(Debug, Default)]
pub struct MockMetadataService {
    title: Mutex<Option<String>>,
    next_error: Mutex<Option<MetadataError>>,
    lookups: AtomicUsize,
}

impl MockMetadataService {
    /// Create a mock that knows no English titles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every lookup with `title`.
    pub fn with_title(title: &str) -> Self {
        let service = Self::new();
        service.set_title(Some(title));
        service
    }

    pub fn set_title(&self, title: Option<&str>) {
        *self.title.lock().unwrap() = title.map(str::to_string);
    }

    /// Configure the next lookup to fail with the given error.
    pub fn set_next_error(&self, error: MetadataError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Number of lookups performed.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataService for MockMetadataService {
    async fn english_title(&self, _media: &MediaDescriptor) -> Result<Option<String>, MetadataError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.title.lock().unwrap().clone())
    }
}
