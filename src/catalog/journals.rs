//! Journal records. Names are unique.

use crate::core::error::TagDbError;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub id: i64,
    pub name: String,
}

pub fn create(conn: &Connection, name: &str) -> Result<Journal, TagDbError> {
    conn.execute("INSERT INTO journals(name) VALUES(?1)", params![name])
        .map_err(|e| TagDbError::from_unique_violation(e, name))?;
    get(conn, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Journal, TagDbError> {
    conn.query_row(
        "SELECT id, name FROM journals WHERE id = ?1",
        params![id],
        |row| {
            Ok(Journal {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| TagDbError::NotFound(format!("journal id {}", id)))
}

pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Journal>, TagDbError> {
    Ok(conn
        .query_row(
            "SELECT id, name FROM journals WHERE name = ?1",
            params![name],
            |row| {
                Ok(Journal {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?)
}

/// Look up a journal by name, creating it on first use.
pub fn get_or_create(conn: &Connection, name: &str) -> Result<Journal, TagDbError> {
    match get_by_name(conn, name)? {
        Some(j) => Ok(j),
        None => create(conn, name),
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Journal>, TagDbError> {
    let mut stmt = conn.prepare("SELECT id, name FROM journals ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Journal {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    let mut journals = Vec::new();
    for r in rows {
        journals.push(r?);
    }
    Ok(journals)
}
