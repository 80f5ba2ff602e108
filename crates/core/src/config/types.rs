use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::searcher::{SearchSource, SourcePolicy};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("mediaseek.db")
}

/// Media search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search by English title first, falling back to the Chinese title.
    #[serde(default)]
    pub prefer_english_first: bool,
    /// Sources whose results replace the stored result set.
    #[serde(default = "default_persisting_sources")]
    pub persisting_sources: Vec<SearchSource>,
    /// Persisting sources that auto-download from the stored set instead of
    /// returning results to the caller.
    #[serde(default)]
    pub auto_download_sources: Vec<SearchSource>,
    /// Sites to search when the caller does not name any (None = all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sites: Option<Vec<String>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prefer_english_first: false,
            persisting_sources: default_persisting_sources(),
            auto_download_sources: Vec::new(),
            default_sites: None,
        }
    }
}

fn default_persisting_sources() -> Vec<SearchSource> {
    vec![
        SearchSource::Wechat,
        SearchSource::Telegram,
        SearchSource::Slack,
    ]
}

impl SourcePolicy for SearchConfig {
    fn is_persisting(&self, source: SearchSource) -> bool {
        self.persisting_sources.contains(&source)
    }

    fn auto_download(&self, source: SearchSource) -> bool {
        self.auto_download_sources.contains(&source)
    }
}
