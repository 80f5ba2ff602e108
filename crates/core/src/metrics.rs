//! Prometheus metrics for the search core.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Media searches by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediaseek_searches_total", "Total media searches"),
        &["outcome"], // "found", "empty", "skipped"
    )
    .unwrap()
});

/// Searches that retried with the fallback keyword.
pub static KEYWORD_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediaseek_keyword_fallbacks_total",
        "Searches retried with the secondary keyword",
    )
    .unwrap()
});

/// Indexer queries by phase.
pub static INDEXER_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediaseek_indexer_queries_total", "Total indexer queries"),
        &["phase"], // "primary", "secondary", "direct"
    )
    .unwrap()
});

/// Candidates found per media search.
pub static CANDIDATES_FOUND: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "mediaseek_candidates_found",
            "Number of candidates found per media search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

/// Media search duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediaseek_search_duration_seconds",
            "Duration of a media search including fallback",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Result rows written to the store.
pub static RESULTS_PERSISTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediaseek_results_persisted_total",
        "Search result rows written to the result store",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(KEYWORD_FALLBACKS.clone()),
        Box::new(INDEXER_QUERIES.clone()),
        Box::new(CANDIDATES_FOUND.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(RESULTS_PERSISTED.clone()),
    ]
}
