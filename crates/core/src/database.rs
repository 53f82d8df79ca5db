use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OptionalExtension};

use crate::config::AppConfig;
use crate::error::StorageError;
use crate::persistence::{Slot, SLOT_KEY};

/// SQLite-backed key-value store holding the task slot.
pub struct Database {
    conn: Connection,
    key: String,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self {
            conn,
            key: SLOT_KEY.to_string(),
        };
        db.apply_migrations()
            .context("Failed to prepare task slot table")?;
        Ok(db)
    }

    /// Like [`Database::initialize`], but a file SQLite cannot use is renamed
    /// to `<name>.corrupt` and a fresh database is created in its place.
    pub fn open_or_recover(config: &AppConfig) -> Result<Self> {
        let err = match Self::initialize(config) {
            Ok(db) => return Ok(db),
            Err(err) => err,
        };
        let db_path = config.db_path();
        if !db_path.is_file() {
            return Err(err);
        }

        let backup = corrupt_path(config);
        tracing::warn!(
            error = %format!("{err:#}"),
            backup = %backup.display(),
            "task database is unreadable, moving it aside"
        );
        fs::rename(db_path, &backup).with_context(|| {
            format!("Failed to move {} aside", db_path.display())
        })?;
        Self::initialize(config)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn apply_migrations(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
             );",
        )?;
        Ok(())
    }
}

fn corrupt_path(config: &AppConfig) -> PathBuf {
    let mut name = config.db_path().as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl Slot for Database {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = :key",
                named_params![":key": &self.key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params![":key": &self.key, ":value": payload],
        )?;
        Ok(())
    }
}
