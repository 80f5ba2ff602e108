//! Stored results of the most recent persisting search.
//!
//! The table is replaced wholesale on every persisting search: rows from an
//! earlier search are never merged with fresh ones.

mod sqlite;
mod types;

pub use sqlite::SqliteResultStore;
pub use types::*;

use crate::searcher::ReleaseCandidate;

/// Trait for search result storage backends.
pub trait ResultStore: Send + Sync {
    /// Remove every stored result.
    fn delete_all(&self) -> Result<(), ResultStoreError>;

    /// Append results in the given order.
    ///
    /// `search_title` labels the search the rows came from; `ident` tells
    /// downstream consumers whether to run identification on the rows.
    fn insert(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError>;

    /// Get a stored result by ID.
    fn get_by_id(&self, id: i64) -> Result<Option<StoredResult>, ResultStoreError>;

    /// All stored results, in insertion order.
    fn get_all(&self) -> Result<Vec<StoredResult>, ResultStoreError>;

    /// Number of stored results.
    fn count(&self) -> Result<i64, ResultStoreError>;

    /// Clear the table, then insert `items`.
    ///
    /// The default is not atomic on its own: a reader going straight to the
    /// store can see the empty table between the two steps. `SearchService`
    /// serializes its own readers against replaces; backends with
    /// transactions should still override this.
    fn replace_all(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        self.delete_all()?;
        self.insert(items, search_title, ident)
    }
}
