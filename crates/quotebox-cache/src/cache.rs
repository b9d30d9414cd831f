use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Could not create storage directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// String key-value store on top of a single SQLite table
///
/// Values are opaque strings; callers decide the encoding (the quote
/// store writes JSON under `quotes` and a bare label under
/// `selectedCategory`).
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open (or create) the store at `db_path`, creating parent directories as needed
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening key-value store at {}", db_path.display());
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Throwaway store, gone when dropped
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite the value under `key`
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_is_none() {
        let store = KvStore::in_memory().unwrap();
        assert_eq!(store.get("quotes").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = KvStore::in_memory().unwrap();
        store.set("selectedCategory", "Life").unwrap();
        store.set("selectedCategory", "Motivation").unwrap();

        assert_eq!(
            store.get("selectedCategory").unwrap().as_deref(),
            Some("Motivation")
        );
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("quotebox.db");

        {
            let store = KvStore::open(&path).unwrap();
            store.set("quotes", r#"[{"text":"a","category":"b"}]"#).unwrap();
        }

        let reopened = KvStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("quotes").unwrap().as_deref(),
            Some(r#"[{"text":"a","category":"b"}]"#)
        );
    }
}
