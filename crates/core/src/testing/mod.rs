//! Testing utilities and mock implementations of the search collaborators.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediaseek_core::testing::{fixtures, MockIndexer, MockMetadataService};
//!
//! let indexer = MockIndexer::new();
//! indexer.set_results_for("Dune", vec![fixtures::candidate("Dune 2021 2160p")]);
//!
//! let metadata = MockMetadataService::with_title("Dune");
//! ```

mod mock_indexer;
mod mock_metadata;
mod recorders;

pub use mock_indexer::{MockIndexer, RecordedSearch};
pub use mock_metadata::MockMetadataService;
pub use recorders::{RecordingEventBus, RecordingProgress, RecordingResultStore, StoreCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::media::{MediaDescriptor, MediaType};
    use crate::searcher::ReleaseCandidate;

    /// Create a candidate with reasonable defaults.
    pub fn candidate(title: &str) -> ReleaseCandidate {
        ReleaseCandidate {
            site: Some("mock-site".to_string()),
            enclosure: Some(format!("https://mock-site.test/download/{}", title.len())),
            size_bytes: 1024 * 1024 * 1024 * 4, // 4 GB
            seeders: 10,
            peers: 2,
            ..ReleaseCandidate::new(title)
        }
    }

    /// Create a candidate with explicit ranking fields.
    pub fn ranked_candidate(
        title: &str,
        res_order: u32,
        site_order: u32,
        seeders: u32,
    ) -> ReleaseCandidate {
        ReleaseCandidate {
            res_order,
            site_order,
            seeders,
            ..candidate(title)
        }
    }

    /// Create a movie descriptor. `title` doubles as the Chinese name.
    pub fn movie(title: &str, en_name: Option<&str>, year: u16) -> MediaDescriptor {
        MediaDescriptor {
            cn_name: Some(title.to_string()),
            en_name: en_name.map(str::to_string),
            year: Some(year),
            ..MediaDescriptor::new(title, MediaType::Movie)
        }
    }

    /// Create a show descriptor. `title` doubles as the Chinese name.
    pub fn show(title: &str, en_name: Option<&str>, year: u16) -> MediaDescriptor {
        MediaDescriptor {
            media_type: Some(MediaType::Tv),
            ..movie(title, en_name, year)
        }
    }
}
