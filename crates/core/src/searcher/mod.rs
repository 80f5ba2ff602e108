//! Media search core.
//!
//! Turns an identified media item into indexer queries: builds filters from
//! the media's seasons and episodes, derives a primary and fallback keyword,
//! runs the two-phase search and ranks the results for storage.

mod filter;
mod keyword;
mod ranker;
mod service;
mod traits;
mod types;

pub use filter::build_filters;
pub use keyword::KeywordStrategy;
pub use ranker::{compare_candidates, rank_candidates};
pub use service::SearchService;
pub use traits::*;
pub use types::*;
