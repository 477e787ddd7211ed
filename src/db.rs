// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::KeyValueBackend;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "FinChronicle", "finchronicle"));

/// Overrides the data file location when set.
pub const DB_ENV: &str = "FINCHRONICLE_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finchronicle.sqlite"))
}

/// Opens the store at `path`, or the default location when `None`.
pub fn open_or_init(path: Option<&Path>) -> Result<SqliteBackend> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    SqliteBackend::open(&path)
}

/// Key-value rows in a single SQLite table.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Create data dir {}", parent.display()))?;
            }
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened storage");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS storage(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl KeyValueBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO storage(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM storage WHERE key=?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM storage", [])?;
        Ok(())
    }
}
