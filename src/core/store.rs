//! Store handle for the pdftags database.
//!
//! A `Store` is an explicit handle to the on-disk database, constructed once
//! and passed to callers. There is no global session or engine singleton;
//! every operation takes a connection opened from a `Store`.

use crate::core::db;
use crate::core::error::TagDbError;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PDFTAGS_DATA_DIR";

#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the data directory holding the database file.
    pub root: PathBuf,
}

impl Store {
    /// Resolve the data directory: explicit override first, then the
    /// `PDFTAGS_DATA_DIR` environment variable, then the platform user-data
    /// directory (e.g. `~/.local/share/pdftags`).
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Store, TagDbError> {
        if let Some(dir) = override_dir {
            return Ok(Store { root: dir });
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(Store {
                root: PathBuf::from(dir),
            });
        }
        let base = dirs::data_dir().ok_or_else(|| {
            TagDbError::ValidationError(
                "no user data directory on this platform; pass --data-dir".to_string(),
            )
        })?;
        Ok(Store {
            root: base.join("pdftags"),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(schemas::DB_NAME)
    }

    /// Create the data directory and database file with the full schema.
    /// Safe to call on an existing store.
    pub fn initialize(&self) -> Result<(), TagDbError> {
        fs::create_dir_all(&self.root).map_err(TagDbError::IoError)?;
        let conn = db::db_connect(&self.db_path().to_string_lossy())?;
        db::initialize_db(&conn)?;
        Ok(())
    }

    /// Open a connection to an initialized store. Fails with `NotFound` if
    /// the database file does not exist yet.
    pub fn open(&self) -> Result<Connection, TagDbError> {
        let db_path = self.db_path();
        if !db_path.exists() {
            return Err(TagDbError::NotFound(format!(
                "database not found at {}. Run `pdftags init` first.",
                db_path.display()
            )));
        }
        db::db_connect(&db_path.to_string_lossy())
    }
}
