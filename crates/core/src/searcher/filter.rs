//! Filter construction from media semantics.

use super::{FilterCriteria, FilterOverrides};
use crate::media::MediaDescriptor;

/// Build the indexer filter criteria for a media search.
///
/// Episodes without a season are assumed to belong to season 1. Overrides are
/// applied last and win over computed values.
pub fn build_filters(
    media: &MediaDescriptor,
    sites: Option<&[String]>,
    overrides: Option<&FilterOverrides>,
) -> FilterCriteria {
    let episode = media.episode_list();
    let mut season = media.season_list();
    if !episode.is_empty() && season.as_ref().is_none_or(|s| s.is_empty()) {
        season = Some(vec![1]);
    }

    let mut filters = FilterCriteria {
        season,
        episode,
        year: media.year,
        media_type: media.media_type,
        site: sites.map(|s| s.to_vec()),
        seeders: true,
        ..Default::default()
    };

    if let Some(overrides) = overrides {
        filters.apply(overrides);
    }

    filters
}
