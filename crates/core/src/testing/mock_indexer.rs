//! Mock indexer for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use crate::media::MediaDescriptor;
use crate::searcher::{
    FilterCriteria, Indexer, IndexerError, KeywordQuery, ReleaseCandidate, SearchSource,
};

/// A recorded indexer query for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub keyword: KeywordQuery,
    pub filters: FilterCriteria,
    /// Title of the media passed for matching, if any.
    pub media_title: Option<String>,
    pub source: Option<SearchSource>,
    pub timestamp: Instant,
}

/// Mock implementation of the Indexer trait.
///
/// Returns per-keyword results when configured for the queried keyword, the
/// default results otherwise. Every query is recorded.
#[derive(Debug, Default)]
pub struct MockIndexer {
    results: Mutex<Vec<ReleaseCandidate>>,
    results_by_keyword: Mutex<HashMap<String, Vec<ReleaseCandidate>>>,
    searches: Mutex<Vec<RecordedSearch>>,
    next_error: Mutex<Option<IndexerError>>,
}

impl MockIndexer {
    /// Create a new mock indexer with empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results returned for any keyword without specific results.
    pub fn set_results(&self, results: Vec<ReleaseCandidate>) {
        *self.results.lock().unwrap() = results;
    }

    /// Set the results returned for one keyword.
    pub fn set_results_for(&self, keyword: &str, results: Vec<ReleaseCandidate>) {
        self.results_by_keyword
            .lock()
            .unwrap()
            .insert(keyword.to_string(), results);
    }

    /// Configure the next search to fail with the given error.
    pub fn set_next_error(&self, error: IndexerError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Get recorded searches.
    pub fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().unwrap().clone()
    }

    /// Get the number of searches performed.
    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }
}

#[async_trait]
impl Indexer for MockIndexer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_by_keyword(
        &self,
        keyword: &KeywordQuery,
        filters: &FilterCriteria,
        match_media: Option<&MediaDescriptor>,
        source: Option<SearchSource>,
    ) -> Result<Vec<ReleaseCandidate>, IndexerError> {
        self.searches.lock().unwrap().push(RecordedSearch {
            keyword: keyword.clone(),
            filters: filters.clone(),
            media_title: match_media.map(|m| m.title.clone()),
            source,
            timestamp: Instant::now(),
        });

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        let by_keyword = self.results_by_keyword.lock().unwrap();
        let specific = match keyword {
            KeywordQuery::Single(k) => by_keyword.get(k).cloned(),
            KeywordQuery::Many(keys) => {
                let merged: Vec<_> = keys
                    .iter()
                    .filter_map(|k| by_keyword.get(k))
                    .flatten()
                    .cloned()
                    .collect();
                (!merged.is_empty()).then_some(merged)
            }
        };

        Ok(specific.unwrap_or_else(|| self.results.lock().unwrap().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_default_and_keyword_results() {
        let indexer = MockIndexer::new();
        indexer.set_results(vec![fixtures::candidate("default")]);
        indexer.set_results_for("Dune", vec![fixtures::candidate("Dune 2021")]);

        let filters = FilterCriteria::default();
        let dune = indexer
            .search_by_keyword(&KeywordQuery::from("Dune"), &filters, None, None)
            .await
            .unwrap();
        let other = indexer
            .search_by_keyword(&KeywordQuery::from("Arrival"), &filters, None, None)
            .await
            .unwrap();

        assert_eq!(dune[0].title, "Dune 2021");
        assert_eq!(other[0].title, "default");
        assert_eq!(indexer.search_count(), 2);
    }

    #[tokio::test]
    async fn test_next_error_fires_once() {
        let indexer = MockIndexer::new();
        indexer.set_next_error(IndexerError::Timeout);

        let filters = FilterCriteria::default();
        let first = indexer
            .search_by_keyword(&KeywordQuery::from("Dune"), &filters, None, None)
            .await;
        let second = indexer
            .search_by_keyword(&KeywordQuery::from("Dune"), &filters, None, None)
            .await;

        assert!(first.is_err());
        assert!(second.unwrap().is_empty());
    }
}
