//! Types for the media search core.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::media::MediaType;
use crate::results::ResultStoreError;

/// Channel a search request originated from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    /// Scheduled subscription feed.
    Rss,
    Wechat,
    Telegram,
    Slack,
    /// Douban wish-list sync.
    Douban,
    /// Manual trigger from the web UI.
    Web,
    /// Programmatic API caller.
    Api,
    Other,
}

impl SearchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSource::Rss => "rss",
            SearchSource::Wechat => "wechat",
            SearchSource::Telegram => "telegram",
            SearchSource::Slack => "slack",
            SearchSource::Douban => "douban",
            SearchSource::Web => "web",
            SearchSource::Api => "api",
            SearchSource::Other => "other",
        }
    }
}

/// One keyword or a batch of keywords handed to the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordQuery {
    Single(String),
    Many(Vec<String>),
}

impl KeywordQuery {
    /// True when there is no non-blank keyword to search for.
    pub fn is_empty(&self) -> bool {
        match self {
            KeywordQuery::Single(keyword) => keyword.trim().is_empty(),
            KeywordQuery::Many(keywords) => keywords.iter().all(|k| k.trim().is_empty()),
        }
    }
}

impl std::fmt::Display for KeywordQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordQuery::Single(keyword) => write!(f, "{}", keyword),
            KeywordQuery::Many(keywords) => write!(f, "{}", keywords.join(", ")),
        }
    }
}

impl From<&str> for KeywordQuery {
    fn from(keyword: &str) -> Self {
        KeywordQuery::Single(keyword.to_string())
    }
}

impl From<String> for KeywordQuery {
    fn from(keyword: String) -> Self {
        KeywordQuery::Single(keyword)
    }
}

impl From<Vec<String>> for KeywordQuery {
    fn from(keywords: Vec<String>) -> Self {
        KeywordQuery::Many(keywords)
    }
}

/// Filter criteria passed to the indexer alongside the keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Seasons to accept. `None` = unrestricted.
    pub season: Option<Vec<u32>>,
    /// Episodes to accept. Empty = all.
    #[serde(default)]
    pub episode: Vec<u32>,
    pub year: Option<u16>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    /// Sites to query. `None` = every configured site.
    pub site: Option<Vec<String>>,
    /// Only accept releases with at least one seeder.
    pub seeders: bool,
    /// Caller-supplied keys opaque to the core.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            season: None,
            episode: Vec::new(),
            year: None,
            media_type: None,
            site: None,
            seeders: true,
            extra: Map::new(),
        }
    }
}

impl FilterCriteria {
    /// Merge caller overrides into these criteria. Overridden keys win.
    pub fn apply(&mut self, overrides: &FilterOverrides) {
        if let Some(season) = &overrides.season {
            self.season = season.clone();
        }
        if let Some(episode) = &overrides.episode {
            self.episode = episode.clone();
        }
        if let Some(year) = overrides.year {
            self.year = year;
        }
        if let Some(media_type) = overrides.media_type {
            self.media_type = media_type;
        }
        if let Some(site) = &overrides.site {
            self.site = site.clone();
        }
        if let Some(seeders) = overrides.seeders {
            self.seeders = seeders;
        }
        for (key, value) in &overrides.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Caller-supplied filter overrides.
///
/// An absent key leaves the computed value alone. For nullable keys,
/// `Some(None)` (JSON `null`) explicitly clears the computed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOverrides {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<Option<Vec<u32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<Vec<u32>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<Option<u16>>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<Option<MediaType>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub site: Option<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeders: Option<bool>,
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

/// Distinguishes a missing field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// A release reported by an indexer.
///
/// The ranking fields default to 0 when the indexer leaves them out, so every
/// candidate is comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseCandidate {
    /// Release title as listed by the site.
    pub title: String,
    /// Site that listed the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Download link (torrent or magnet).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<String>,
    /// Details page on the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub seeders: u32,
    #[serde(default)]
    pub peers: u32,
    /// Resolution priority, higher is better.
    #[serde(default)]
    pub res_order: u32,
    /// Site priority, higher is better.
    #[serde(default)]
    pub site_order: u32,
    /// Other indexer metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl ReleaseCandidate {
    /// Create a candidate with a title and all other fields empty.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            site: None,
            description: None,
            enclosure: None,
            page_url: None,
            size_bytes: 0,
            seeders: 0,
            peers: 0,
            res_order: 0,
            site_order: 0,
            metadata: Map::new(),
        }
    }
}

/// Primary keyword and optional fallback for one media search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeywords {
    pub primary: String,
    pub secondary: Option<String>,
}

impl SearchKeywords {
    /// The fallback keyword, if it exists and differs from the primary one.
    pub fn fallback(&self) -> Option<&str> {
        self.secondary
            .as_deref()
            .filter(|secondary| !secondary.is_empty() && *secondary != self.primary)
    }
}

/// Errors reported by an indexer backend.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Indexer connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Indexer API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors reported by the metadata service.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse metadata response: {0}")]
    ParseError(String),
}

/// Errors that abort a search. Empty results are not errors.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Store(#[from] ResultStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_source_serialization() {
        assert_eq!(
            serde_json::to_string(&SearchSource::Telegram).unwrap(),
            "\"telegram\""
        );
        let parsed: SearchSource = serde_json::from_str("\"douban\"").unwrap();
        assert_eq!(parsed, SearchSource::Douban);
        assert_eq!(SearchSource::Wechat.as_str(), "wechat");
    }

    #[test]
    fn test_keyword_query_untagged() {
        let single: KeywordQuery = serde_json::from_str("\"Dune\"").unwrap();
        assert_eq!(single, KeywordQuery::Single("Dune".to_string()));

        let many: KeywordQuery = serde_json::from_str(r#"["Dune", "沙丘"]"#).unwrap();
        assert_eq!(
            many,
            KeywordQuery::Many(vec!["Dune".to_string(), "沙丘".to_string()])
        );
    }

    #[test]
    fn test_keyword_query_is_empty() {
        assert!(KeywordQuery::from("").is_empty());
        assert!(KeywordQuery::from("  ").is_empty());
        assert!(KeywordQuery::Many(vec![]).is_empty());
        assert!(KeywordQuery::Many(vec!["".to_string()]).is_empty());
        assert!(!KeywordQuery::from("Dune").is_empty());
    }

    #[test]
    fn test_filter_criteria_serializes_type_key() {
        let filters = FilterCriteria {
            media_type: Some(MediaType::Movie),
            ..Default::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value["type"], "movie");
        assert_eq!(value["seeders"], true);
        assert_eq!(value["season"], Value::Null);
    }

    #[test]
    fn test_overrides_distinguish_missing_and_null() {
        let overrides: FilterOverrides =
            serde_json::from_value(json!({ "site": null, "free": true })).unwrap();
        assert_eq!(overrides.site, Some(None));
        assert!(overrides.season.is_none());
        assert_eq!(overrides.extra.get("free"), Some(&json!(true)));
    }

    #[test]
    fn test_apply_overrides() {
        let mut filters = FilterCriteria {
            season: Some(vec![1]),
            year: Some(2020),
            site: Some(vec!["a".to_string()]),
            ..Default::default()
        };
        let overrides = FilterOverrides {
            site: Some(None),
            seeders: Some(false),
            ..Default::default()
        };

        filters.apply(&overrides);

        assert_eq!(filters.season, Some(vec![1]));
        assert_eq!(filters.year, Some(2020));
        assert!(filters.site.is_none());
        assert!(!filters.seeders);
    }

    #[test]
    fn test_candidate_missing_ranking_fields_default_to_zero() {
        let candidate: ReleaseCandidate =
            serde_json::from_value(json!({ "title": "Dune 2021 1080p" })).unwrap();
        assert_eq!(candidate.res_order, 0);
        assert_eq!(candidate.site_order, 0);
        assert_eq!(candidate.seeders, 0);
    }

    #[test]
    fn test_fallback_keyword() {
        let keywords = SearchKeywords {
            primary: "沙丘".to_string(),
            secondary: Some("Dune".to_string()),
        };
        assert_eq!(keywords.fallback(), Some("Dune"));

        let same = SearchKeywords {
            primary: "Dune".to_string(),
            secondary: Some("Dune".to_string()),
        };
        assert!(same.fallback().is_none());

        let none = SearchKeywords {
            primary: "Dune".to_string(),
            secondary: None,
        };
        assert!(none.fallback().is_none());
    }
}
