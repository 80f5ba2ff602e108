//! Types describing an identified movie or show.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kind of media being searched for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Tv,
}

/// An identified movie or show, as produced by the metadata resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Display title (usually localized).
    pub title: String,
    /// Chinese name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cn_name: Option<String>,
    /// English name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_name: Option<String>,
    /// Title in the original language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// ISO 639-1 code of the original language (e.g. "en", "zh").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Movie or show. `None` when the resolver could not tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Explicit search keyword; bypasses name derivation entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_episode: Option<u32>,
}

/// Plain field-value snapshot of a [`MediaDescriptor`], used in event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSnapshot {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cn_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Seasons covered by the descriptor (empty = unrestricted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<u32>,
    /// Episodes covered by the descriptor (empty = all).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<u32>,
}

impl MediaDescriptor {
    /// Create a descriptor with just a title and type.
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type: Some(media_type),
            ..Default::default()
        }
    }

    /// Seasons implied by the season range, or `None` when no starting season
    /// is set.
    pub fn season_list(&self) -> Option<Vec<u32>> {
        let begin = self.begin_season?;
        Some(inclusive_range(begin, self.end_season.unwrap_or(begin)))
    }

    /// Episodes implied by the episode range. Empty when no starting episode
    /// is set.
    pub fn episode_list(&self) -> Vec<u32> {
        match self.begin_episode {
            Some(begin) => inclusive_range(begin, self.end_episode.unwrap_or(begin)),
            None => Vec::new(),
        }
    }

    /// Snapshot of the descriptor as plain data.
    pub fn snapshot(&self) -> MediaSnapshot {
        MediaSnapshot {
            title: self.title.clone(),
            cn_name: self.cn_name.clone(),
            en_name: self.en_name.clone(),
            original_title: self.original_title.clone(),
            original_language: self.original_language.clone(),
            year: self.year,
            media_type: self.media_type,
            seasons: self.season_list().unwrap_or_default(),
            episodes: self.episode_list(),
        }
    }

    /// Whether the original language is English.
    pub fn is_english_original(&self) -> bool {
        self.original_language
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case("en"))
    }
}

/// Longest season or episode range expanded into a list.
pub const MAX_RANGE_LEN: u32 = 2000;

fn inclusive_range(a: u32, b: u32) -> Vec<u32> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let capped = hi.min(lo.saturating_add(MAX_RANGE_LEN - 1));
    if capped < hi {
        warn!(
            "Range {}-{} exceeds {} entries, truncating at {}",
            lo, hi, MAX_RANGE_LEN, capped
        );
    }
    (lo..=capped).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show() -> MediaDescriptor {
        MediaDescriptor::new("Some Show", MediaType::Tv)
    }

    #[test]
    fn test_season_list_unset() {
        assert!(show().season_list().is_none());
    }

    #[test]
    fn test_season_list_single() {
        let media = MediaDescriptor {
            begin_season: Some(2),
            ..show()
        };
        assert_eq!(media.season_list(), Some(vec![2]));
    }

    #[test]
    fn test_season_list_range() {
        let media = MediaDescriptor {
            begin_season: Some(1),
            end_season: Some(3),
            ..show()
        };
        assert_eq!(media.season_list(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let media = MediaDescriptor {
            begin_episode: Some(5),
            end_episode: Some(3),
            ..show()
        };
        assert_eq!(media.episode_list(), vec![3, 4, 5]);
    }

    #[test]
    fn test_oversized_range_is_truncated() {
        let media = MediaDescriptor {
            begin_episode: Some(10),
            end_episode: Some(u32::MAX),
            ..show()
        };
        let episodes = media.episode_list();
        assert_eq!(episodes.len(), MAX_RANGE_LEN as usize);
        assert_eq!(episodes.first(), Some(&10));
        assert_eq!(episodes.last(), Some(&(10 + MAX_RANGE_LEN - 1)));
    }

    #[test]
    fn test_range_ending_at_max_value() {
        let media = MediaDescriptor {
            begin_season: Some(u32::MAX),
            ..show()
        };
        assert_eq!(media.season_list(), Some(vec![u32::MAX]));
    }

    #[test]
    fn test_episode_list_empty_without_begin() {
        let media = MediaDescriptor {
            end_episode: Some(8),
            ..show()
        };
        assert!(media.episode_list().is_empty());
    }

    #[test]
    fn test_is_english_original() {
        let mut media = show();
        assert!(!media.is_english_original());
        media.original_language = Some("EN".to_string());
        assert!(media.is_english_original());
        media.original_language = Some("ja".to_string());
        assert!(!media.is_english_original());
    }

    #[test]
    fn test_snapshot_serialization() {
        let media = MediaDescriptor {
            year: Some(2019),
            begin_season: Some(1),
            begin_episode: Some(1),
            end_episode: Some(2),
            ..show()
        };

        let json = serde_json::to_value(media.snapshot()).unwrap();
        assert_eq!(json["title"], "Some Show");
        assert_eq!(json["media_type"], "tv");
        assert_eq!(json["year"], 2019);
        assert_eq!(json["seasons"], serde_json::json!([1]));
        assert_eq!(json["episodes"], serde_json::json!([1, 2]));
        assert!(json.get("cn_name").is_none());
    }
}
