//! Collaborator seams of the search core.

use async_trait::async_trait;

use super::{
    FilterCriteria, IndexerError, KeywordQuery, MetadataError, ReleaseCandidate, SearchSource,
};
use crate::media::MediaDescriptor;

/// Backend that runs a keyword query against the configured sites.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Search all allowed sites for the keyword(s).
    ///
    /// Returns an empty list when nothing matched; only real failures
    /// (network, backend) are errors.
    async fn search_by_keyword(
        &self,
        keyword: &KeywordQuery,
        filters: &FilterCriteria,
        match_media: Option<&MediaDescriptor>,
        source: Option<SearchSource>,
    ) -> Result<Vec<ReleaseCandidate>, IndexerError>;
}

/// Metadata lookups needed for keyword derivation.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// English title of the media, if the metadata source knows one.
    async fn english_title(&self, media: &MediaDescriptor) -> Result<Option<String>, MetadataError>;
}

/// Decides what happens to the results of a search from a given source.
pub trait SourcePolicy: Send + Sync {
    /// Whether results from this source replace the stored result set.
    fn is_persisting(&self, source: SearchSource) -> bool;

    /// Whether this source downloads automatically from the stored set.
    fn auto_download(&self, source: SearchSource) -> bool;
}
