//! SQLite-backed result store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection};

use super::{ResultStore, ResultStoreError, StoredResult};
use crate::config::DatabaseConfig;
use crate::searcher::ReleaseCandidate;

const SELECT_COLUMNS: &str = "SELECT id, search_title, ident, candidate, created_at FROM search_results";

/// SQLite-backed result store.
pub struct SqliteResultStore {
    conn: Mutex<Connection>,
}

impl SqliteResultStore {
    /// Create a new SQLite result store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, ResultStoreError> {
        let conn =
            Connection::open(path).map_err(|e| ResultStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open the store at the configured database path.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, ResultStoreError> {
        Self::new(&config.path)
    }

    /// Create an in-memory SQLite result store (useful for testing).
    pub fn in_memory() -> Result<Self, ResultStoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), ResultStoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS search_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                search_title TEXT,
                ident INTEGER NOT NULL DEFAULT 1,
                title TEXT NOT NULL,
                site TEXT,
                res_order INTEGER NOT NULL DEFAULT 0,
                site_order INTEGER NOT NULL DEFAULT 0,
                seeders INTEGER NOT NULL DEFAULT 0,
                candidate TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_search_results_title ON search_results(title);
            "#,
        )
        .map_err(|e| ResultStoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ResultStoreError> {
        self.conn
            .lock()
            .map_err(|_| ResultStoreError::Database("connection mutex poisoned".to_string()))
    }

    fn insert_rows(
        conn: &Connection,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        let now = Utc::now().to_rfc3339();
        let mut stmt = conn
            .prepare(
                "INSERT INTO search_results (search_title, ident, title, site, res_order, site_order, seeders, candidate, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;

        for item in items {
            let candidate_json = serde_json::to_string(item)
                .map_err(|e| ResultStoreError::Serialization(e.to_string()))?;
            stmt.execute(params![
                search_title,
                ident,
                item.title,
                item.site,
                item.res_order,
                item.site_order,
                item.seeders,
                candidate_json,
                now,
            ])
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;
        }

        Ok(())
    }

    fn row_to_result(row: &rusqlite::Row) -> rusqlite::Result<StoredResult> {
        let candidate_json: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;

        let candidate: ReleaseCandidate = serde_json::from_str(&candidate_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
        })?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(StoredResult {
            id: row.get(0)?,
            search_title: row.get(1)?,
            ident: row.get(2)?,
            candidate,
            created_at,
        })
    }
}

impl ResultStore for SqliteResultStore {
    fn delete_all(&self) -> Result<(), ResultStoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM search_results", [])
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;
        Ok(())
    }

    fn insert(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;
        Self::insert_rows(&tx, items, search_title, ident)?;
        tx.commit()
            .map_err(|e| ResultStoreError::Database(e.to_string()))
    }

    fn get_by_id(&self, id: i64) -> Result<Option<StoredResult>, ResultStoreError> {
        let conn = self.lock()?;

        let result = conn.query_row(
            &format!("{} WHERE id = ?", SELECT_COLUMNS),
            params![id],
            Self::row_to_result,
        );

        match result {
            Ok(result) => Ok(Some(result)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(ResultStoreError::Database(e.to_string())),
        }
    }

    fn get_all(&self) -> Result<Vec<StoredResult>, ResultStoreError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_result)
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| ResultStoreError::Database(e.to_string()))?);
        }
        Ok(results)
    }

    fn count(&self) -> Result<i64, ResultStoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM search_results", [], |row| row.get(0))
            .map_err(|e| ResultStoreError::Database(e.to_string()))
    }

    fn replace_all(
        &self,
        items: &[ReleaseCandidate],
        search_title: Option<&str>,
        ident: bool,
    ) -> Result<(), ResultStoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;

        tx.execute("DELETE FROM search_results", [])
            .map_err(|e| ResultStoreError::Database(e.to_string()))?;
        Self::insert_rows(&tx, items, search_title, ident)?;

        tx.commit()
            .map_err(|e| ResultStoreError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::ranked_candidate;

    fn store() -> SqliteResultStore {
        SqliteResultStore::in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get_all_preserves_order() {
        let store = store();
        let items = vec![
            ranked_candidate("Zeta", 1, 1, 1),
            ranked_candidate("Alpha", 9, 9, 9),
            ranked_candidate("Mid", 5, 5, 5),
        ];

        store.insert(&items, Some("search"), true).unwrap();

        let stored = store.get_all().unwrap();
        assert_eq!(stored.len(), 3);
        let titles: Vec<_> = stored.iter().map(|r| r.candidate.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(stored[0].search_title.as_deref(), Some("search"));
        assert!(stored[0].ident);
    }

    #[test]
    fn test_from_config_persists_to_configured_path() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = DatabaseConfig {
            path: temp_dir.path().join("results.db"),
        };

        let store = SqliteResultStore::from_config(&config).unwrap();
        store
            .insert(&[ranked_candidate("Dune", 1, 1, 1)], None, true)
            .unwrap();
        drop(store);

        let reopened = SqliteResultStore::from_config(&config).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert!(config.path.exists());
    }

    #[test]
    fn test_get_by_id() {
        let store = store();
        store
            .insert(&[ranked_candidate("Dune", 3, 2, 40)], None, false)
            .unwrap();

        let all = store.get_all().unwrap();
        let found = store.get_by_id(all[0].id).unwrap().unwrap();
        assert_eq!(found.candidate, all[0].candidate);
        assert!(!found.ident);
        assert!(found.search_title.is_none());

        assert!(store.get_by_id(all[0].id + 100).unwrap().is_none());
    }

    #[test]
    fn test_delete_all() {
        let store = store();
        store
            .insert(&[ranked_candidate("A", 1, 1, 1), ranked_candidate("B", 1, 1, 1)], None, true)
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);

        store.delete_all().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_replace_all_drops_previous_rows() {
        let store = store();
        store
            .insert(&[ranked_candidate("Old", 1, 1, 1)], Some("old"), true)
            .unwrap();

        store
            .replace_all(
                &[ranked_candidate("New 1", 1, 1, 1), ranked_candidate("New 2", 1, 1, 1)],
                Some("new"),
                true,
            )
            .unwrap();

        let stored = store.get_all().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|r| r.search_title.as_deref() == Some("new")));
        assert_eq!(stored[0].candidate.title, "New 1");
    }

    #[test]
    fn test_candidate_metadata_round_trips() {
        let store = store();
        let mut candidate = ranked_candidate("Dune", 3, 2, 40);
        candidate
            .metadata
            .insert("free".to_string(), serde_json::json!(true));

        store.insert(&[candidate.clone()], None, true).unwrap();

        let stored = store.get_all().unwrap();
        assert_eq!(stored[0].candidate, candidate);
    }
}
