//! Keyword derivation for bilingual searches.
//!
//! Sites index titles inconsistently across regions, so a media search tries
//! one language first and falls back to the other when nothing is found.

use tracing::debug;

use super::{MetadataError, MetadataService, SearchKeywords};
use crate::media::MediaDescriptor;

/// Picks the primary and fallback keyword for a media search.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordStrategy {
    /// Search by the English title first, falling back to the Chinese one.
    pub prefer_english_first: bool,
}

impl KeywordStrategy {
    pub fn new(prefer_english_first: bool) -> Self {
        Self {
            prefer_english_first,
        }
    }

    /// Derive the keywords for `media`.
    ///
    /// An explicit keyword on the descriptor is used as-is with no fallback.
    /// The metadata service is only consulted when the descriptor has no
    /// English name and the original language is not English.
    pub async fn derive(
        &self,
        media: &MediaDescriptor,
        metadata: &dyn MetadataService,
    ) -> Result<SearchKeywords, MetadataError> {
        if let Some(keyword) = non_blank(media.keyword.as_deref()) {
            return Ok(SearchKeywords {
                primary: keyword.to_string(),
                secondary: None,
            });
        }

        let cn_name = non_blank(media.cn_name.as_deref())
            .unwrap_or(&media.title)
            .to_string();
        let en_name = self.english_name(media, metadata).await?;

        let keywords = if self.prefer_english_first {
            match en_name {
                Some(en_name) => SearchKeywords {
                    primary: en_name,
                    secondary: Some(cn_name),
                },
                None => SearchKeywords {
                    primary: cn_name,
                    secondary: None,
                },
            }
        } else {
            SearchKeywords {
                primary: cn_name,
                secondary: en_name,
            }
        };

        debug!(
            "Derived keywords for {}: primary={:?}, secondary={:?}",
            media.title, keywords.primary, keywords.secondary
        );
        Ok(keywords)
    }

    async fn english_name(
        &self,
        media: &MediaDescriptor,
        metadata: &dyn MetadataService,
    ) -> Result<Option<String>, MetadataError> {
        if let Some(en_name) = non_blank(media.en_name.as_deref()) {
            return Ok(Some(en_name.to_string()));
        }
        if media.is_english_original() {
            return Ok(non_blank(media.original_title.as_deref()).map(str::to_string));
        }
        let title = metadata.english_title(media).await?;
        Ok(title.filter(|t| !t.trim().is_empty()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaType;
    use crate::testing::MockMetadataService;

    fn movie() -> MediaDescriptor {
        MediaDescriptor {
            cn_name: Some("沙丘".to_string()),
            original_language: Some("en".to_string()),
            original_title: Some("Dune".to_string()),
            ..MediaDescriptor::new("沙丘", MediaType::Movie)
        }
    }

    #[tokio::test]
    async fn test_explicit_keyword_short_circuits() {
        let metadata = MockMetadataService::with_title("Unused");
        let media = MediaDescriptor {
            keyword: Some("dune part one".to_string()),
            en_name: Some("Dune".to_string()),
            original_language: Some("fr".to_string()),
            ..movie()
        };

        for prefer_english_first in [false, true] {
            let keywords = KeywordStrategy::new(prefer_english_first)
                .derive(&media, &metadata)
                .await
                .unwrap();
            assert_eq!(keywords.primary, "dune part one");
            assert!(keywords.secondary.is_none());
        }
        assert_eq!(metadata.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_chinese_first_with_english_fallback() {
        let metadata = MockMetadataService::new();
        let keywords = KeywordStrategy::new(false)
            .derive(&movie(), &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "沙丘");
        assert_eq!(keywords.secondary.as_deref(), Some("Dune"));
        assert_eq!(metadata.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_english_first_with_chinese_fallback() {
        let metadata = MockMetadataService::new();
        let keywords = KeywordStrategy::new(true)
            .derive(&movie(), &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "Dune");
        assert_eq!(keywords.secondary.as_deref(), Some("沙丘"));
    }

    #[tokio::test]
    async fn test_english_first_without_english_name() {
        let metadata = MockMetadataService::new();
        let media = MediaDescriptor {
            original_language: Some("zh".to_string()),
            ..movie()
        };
        let keywords = KeywordStrategy::new(true)
            .derive(&media, &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "沙丘");
        assert!(keywords.secondary.is_none());
        assert_eq!(metadata.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_title_used_when_chinese_name_missing() {
        let metadata = MockMetadataService::new();
        let media = MediaDescriptor {
            cn_name: Some("   ".to_string()),
            original_language: Some("ja".to_string()),
            ..MediaDescriptor::new("千と千尋の神隠し", MediaType::Movie)
        };
        let keywords = KeywordStrategy::new(false)
            .derive(&media, &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "千と千尋の神隠し");
        assert!(keywords.secondary.is_none());
    }

    #[tokio::test]
    async fn test_metadata_lookup_for_non_english_original() {
        let metadata = MockMetadataService::with_title("Spirited Away");
        let media = MediaDescriptor {
            cn_name: Some("千与千寻".to_string()),
            original_language: Some("ja".to_string()),
            ..MediaDescriptor::new("千と千尋の神隠し", MediaType::Movie)
        };
        let keywords = KeywordStrategy::new(false)
            .derive(&media, &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "千与千寻");
        assert_eq!(keywords.secondary.as_deref(), Some("Spirited Away"));
        assert_eq!(metadata.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_explicit_english_name_skips_lookup() {
        let metadata = MockMetadataService::with_title("Wrong");
        let media = MediaDescriptor {
            en_name: Some("Spirited Away".to_string()),
            original_language: Some("ja".to_string()),
            ..MediaDescriptor::new("千与千寻", MediaType::Movie)
        };
        let keywords = KeywordStrategy::new(true)
            .derive(&media, &metadata)
            .await
            .unwrap();

        assert_eq!(keywords.primary, "Spirited Away");
        assert_eq!(metadata.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_metadata_error_propagates() {
        let metadata = MockMetadataService::new();
        metadata.set_next_error(MetadataError::RequestFailed("boom".to_string()));
        let media = MediaDescriptor {
            original_language: Some("ko".to_string()),
            ..MediaDescriptor::new("기생충", MediaType::Movie)
        };

        let result = KeywordStrategy::new(false).derive(&media, &metadata).await;
        assert!(matches!(result, Err(MetadataError::RequestFailed(_))));
    }
}
