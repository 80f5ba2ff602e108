//! Types for stored search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::searcher::ReleaseCandidate;

/// A search result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResult {
    /// Row ID, assigned on insert.
    pub id: i64,
    /// Title of the search that produced this row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_title: Option<String>,
    /// Whether identification should run on this row downstream.
    pub ident: bool,
    /// The ranked release.
    pub candidate: ReleaseCandidate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
