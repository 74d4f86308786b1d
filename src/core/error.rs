use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagDbError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Corrupt tag path: {0}")]
    CorruptPath(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl TagDbError {
    /// Remap a UNIQUE-constraint failure into `DuplicateName`; every other
    /// SQLite error passes through unchanged.
    pub fn from_unique_violation(err: rusqlite::Error, name: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                TagDbError::DuplicateName(name.to_string())
            }
            _ => TagDbError::RusqliteError(err),
        }
    }
}
