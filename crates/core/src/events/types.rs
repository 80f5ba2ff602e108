use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaSnapshot;
use crate::searcher::{FilterCriteria, KeywordQuery, SearchSource};

/// Events published by the search core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEvent {
    /// A keyword query is about to be sent to the indexer.
    SearchStart {
        keyword: KeywordQuery,
        /// Media the results will be matched against, if any.
        media: Option<MediaSnapshot>,
        filters: FilterCriteria,
        source: Option<SearchSource>,
    },
}

impl SearchEvent {
    /// Event type name as it appears in the serialized payload.
    pub fn event_type(&self) -> &'static str {
        match self {
            SearchEvent::SearchStart { .. } => "search_start",
        }
    }
}

/// Envelope wrapping a search event with metadata
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: SearchEvent,
}
