//! Media search orchestration: primary search, fallback retry, ranking and
//! storage of the winning set.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{
    build_filters, rank_candidates, FilterCriteria, FilterOverrides, Indexer, KeywordQuery,
    KeywordStrategy, MetadataService, ReleaseCandidate, SearchError, SearchKeywords,
    SearchSource, SourcePolicy,
};
use crate::config::SearchConfig;
use crate::events::{EventBus, SearchEvent};
use crate::media::MediaDescriptor;
use crate::metrics;
use crate::progress::{ProgressKey, ProgressSink};
use crate::results::{ResultStore, ResultStoreError, StoredResult};

/// State of a single `search_one` call.
struct SearchSession {
    id: String,
    filters: FilterCriteria,
    keywords: SearchKeywords,
    candidates: Vec<ReleaseCandidate>,
}

/// Searches indexers for media and keeps the stored result set up to date.
///
/// All collaborators are injected; the indexer is optional so a service can be
/// built before any indexer is configured (searches then return nothing).
pub struct SearchService {
    indexer: Option<Arc<dyn Indexer>>,
    metadata: Arc<dyn MetadataService>,
    store: Arc<dyn ResultStore>,
    events: Arc<dyn EventBus>,
    progress: Arc<dyn ProgressSink>,
    policy: Arc<dyn SourcePolicy>,
    keywords: KeywordStrategy,
    default_sites: Option<Vec<String>>,
    /// Writers hold this exclusively for a whole clear-then-insert; readers
    /// share it, so they never see a half-written set.
    results_lock: RwLock<()>,
}

impl SearchService {
    /// Create a search service from configuration.
    ///
    /// The source policy defaults to the persisting and auto-download sets in
    /// `config`; use [`with_source_policy`](Self::with_source_policy) to replace it.
    pub fn new(
        config: &SearchConfig,
        metadata: Arc<dyn MetadataService>,
        store: Arc<dyn ResultStore>,
        events: Arc<dyn EventBus>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            indexer: None,
            metadata,
            store,
            events,
            progress,
            policy: Arc::new(config.clone()),
            keywords: KeywordStrategy::new(config.prefer_english_first),
            default_sites: config.default_sites.clone(),
            results_lock: RwLock::new(()),
        }
    }

    /// Set the indexer backend.
    pub fn with_indexer(mut self, indexer: Arc<dyn Indexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Replace the source policy.
    pub fn with_source_policy(mut self, policy: Arc<dyn SourcePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Whether an indexer is configured.
    pub fn has_indexer(&self) -> bool {
        self.indexer.is_some()
    }

    /// Search for a single identified media item.
    ///
    /// Searches with the primary keyword, then with the fallback keyword if
    /// the first search found nothing. For persisting sources the results are
    /// ranked and replace the stored result set.
    ///
    /// Returns `None` when there is no media, the site list is explicitly
    /// empty, nothing was found, or the source auto-downloads from the stored
    /// set. Non-persisting sources get the unranked results back.
    pub async fn search_one(
        &self,
        media: Option<&MediaDescriptor>,
        source: SearchSource,
        sites: Option<&[String]>,
        filters: Option<&FilterOverrides>,
    ) -> Result<Option<Vec<ReleaseCandidate>>, SearchError> {
        let Some(media) = media else {
            info!("No media to search for");
            metrics::SEARCHES_TOTAL.with_label_values(&["skipped"]).inc();
            return Ok(None);
        };

        let sites = sites.or(self.default_sites.as_deref());
        if sites.is_some_and(|s| s.is_empty()) {
            warn!(
                "No sites enabled for {} searches, skipping {}",
                source.as_str(),
                media.title
            );
            metrics::SEARCHES_TOTAL.with_label_values(&["skipped"]).inc();
            return Ok(None);
        }

        let start = Instant::now();
        self.progress.start(ProgressKey::Search);

        let mut session = SearchSession {
            id: uuid::Uuid::new_v4().simple().to_string()[..8].to_string(),
            filters: build_filters(media, sites, filters),
            keywords: self.keywords.derive(media, self.metadata.as_ref()).await?,
            candidates: Vec::new(),
        };

        info!("[{}] Searching for {} ...", session.id, session.keywords.primary);
        session.candidates = self
            .query_indexer(
                &KeywordQuery::from(session.keywords.primary.as_str()),
                &session.filters,
                Some(media),
                Some(source),
                "primary",
            )
            .await?;

        let mut last_keyword = session.keywords.primary.clone();
        if session.candidates.is_empty() {
            if let Some(fallback) = session.keywords.fallback() {
                info!(
                    "[{}] No results for {}, retrying with {} ...",
                    session.id, session.keywords.primary, fallback
                );
                metrics::KEYWORD_FALLBACKS.inc();
                last_keyword = fallback.to_string();
                session.candidates = self
                    .query_indexer(
                        &KeywordQuery::from(fallback),
                        &session.filters,
                        Some(media),
                        Some(source),
                        "secondary",
                    )
                    .await?;
            }
        }

        metrics::CANDIDATES_FOUND.observe(session.candidates.len() as f64);

        if session.candidates.is_empty() {
            info!("[{}] No results found for {}", session.id, last_keyword);
            Self::record_outcome("empty", start);
            return Ok(None);
        }

        info!(
            "[{}] Found {} results for {}",
            session.id,
            session.candidates.len(),
            last_keyword
        );
        Self::record_outcome("found", start);

        if !self.policy.is_persisting(source) {
            return Ok(Some(session.candidates));
        }

        let ranked = rank_candidates(session.candidates);
        self.replace_results(&ranked).await?;
        debug!("[{}] Stored {} ranked results", session.id, ranked.len());

        if self.policy.auto_download(source) {
            Ok(None)
        } else {
            Ok(Some(ranked))
        }
    }

    /// Run a keyword query against the indexer and return its results as-is.
    ///
    /// Empty keywords and a missing indexer yield an empty list without
    /// touching the indexer or publishing an event.
    pub async fn search_many(
        &self,
        keyword: &KeywordQuery,
        filters: &FilterCriteria,
        match_media: Option<&MediaDescriptor>,
        source: Option<SearchSource>,
    ) -> Result<Vec<ReleaseCandidate>, SearchError> {
        self.query_indexer(keyword, filters, match_media, source, "direct")
            .await
    }

    async fn query_indexer(
        &self,
        keyword: &KeywordQuery,
        filters: &FilterCriteria,
        match_media: Option<&MediaDescriptor>,
        source: Option<SearchSource>,
        phase: &str,
    ) -> Result<Vec<ReleaseCandidate>, SearchError> {
        if keyword.is_empty() {
            debug!("Empty keyword, skipping search");
            return Ok(Vec::new());
        }
        let Some(indexer) = &self.indexer else {
            warn!("No indexer configured, cannot search for {}", keyword);
            return Ok(Vec::new());
        };

        self.events.publish(SearchEvent::SearchStart {
            keyword: keyword.clone(),
            media: match_media.map(MediaDescriptor::snapshot),
            filters: filters.clone(),
            source,
        });
        metrics::INDEXER_QUERIES.with_label_values(&[phase]).inc();

        let results = indexer
            .search_by_keyword(keyword, filters, match_media, source)
            .await?;
        debug!(
            "Indexer {} returned {} results for {}",
            indexer.name(),
            results.len(),
            keyword
        );
        Ok(results)
    }

    async fn replace_results(&self, ranked: &[ReleaseCandidate]) -> Result<(), ResultStoreError> {
        let _guard = self.results_lock.write().await;
        self.store.replace_all(ranked, None, true)?;
        metrics::RESULTS_PERSISTED.inc_by(ranked.len() as u64);
        Ok(())
    }

    fn record_outcome(outcome: &str, start: Instant) {
        metrics::SEARCHES_TOTAL.with_label_values(&[outcome]).inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());
    }

    /// Append results to the store.
    pub async fn insert_results(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        let _guard = self.results_lock.write().await;
        self.store.insert(items, search_title, ident)?;
        metrics::RESULTS_PERSISTED.inc_by(items.len() as u64);
        Ok(())
    }

    /// Remove every stored result.
    pub async fn delete_all_results(&self) -> Result<(), ResultStoreError> {
        let _guard = self.results_lock.write().await;
        self.store.delete_all()
    }

    /// Get a stored result by ID.
    pub async fn get_result_by_id(
        &self,
        id: i64,
    ) -> Result<Option<StoredResult>, ResultStoreError> {
        let _guard = self.results_lock.read().await;
        self.store.get_by_id(id)
    }

    /// All stored results, best first.
    pub async fn get_results(&self) -> Result<Vec<StoredResult>, ResultStoreError> {
        let _guard = self.results_lock.read().await;
        self.store.get_all()
    }
}
