pub mod config;
pub mod events;
pub mod media;
pub mod metrics;
pub mod progress;
pub mod results;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SearchConfig,
};
pub use events::{create_event_channel, ChannelEventBus, EventBus, EventEnvelope, SearchEvent};
pub use media::{MediaDescriptor, MediaSnapshot, MediaType};
pub use progress::{ProgressKey, ProgressSink, ProgressState, ProgressTracker};
pub use results::{ResultStore, ResultStoreError, SqliteResultStore, StoredResult};
pub use searcher::{
    build_filters, compare_candidates, rank_candidates, FilterCriteria, FilterOverrides, Indexer,
    IndexerError, KeywordQuery, KeywordStrategy, MetadataError, MetadataService, ReleaseCandidate,
    SearchError, SearchKeywords, SearchService, SearchSource, SourcePolicy,
};
