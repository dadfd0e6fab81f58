use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".todo-store";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "todos.sqlite";

/// Open the per-user default store, creating the file and schema on first
/// use, and return a live connection. Durability is synchronous: once any
/// write call returns, the bytes are committed.
pub fn ensure_schema() -> Result<Connection, StoreError> {
    ensure_schema_at(default_db_path()?)
}

/// Same as [`ensure_schema`] but against an explicit path, for callers that
/// manage their own data directory. The function also toggles
/// `PRAGMA foreign_keys = ON` so the referential integrity checks in our
/// schema behave the same during tests and production runs.
pub fn ensure_schema_at(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    apply_schema(&conn)?;
    log::debug!("opened todo store at {}", path.display());
    Ok(conn)
}

/// Fully migrated transient store. Used by tests and throwaway tooling.
pub fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Lazy, idempotent migrations. Items carry their owning category id as a
/// plain foreign key; deleting a category cascades to its items so no orphan
/// rows survive, and the index keeps parent-scoped fetches off a full scan.
fn apply_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            sequence INTEGER NOT NULL,
            date_created INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            done INTEGER NOT NULL DEFAULT 0,
            date_created INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_category ON items(category_id)",
        [],
    )?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or_else(|| {
        StoreError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "could not locate home directory",
        ))
    })?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
