//! People records and the ordered author association for documents.

use crate::core::error::TagDbError;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub institute: Option<String>,
}

fn row_to_person(row: &rusqlite::Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        institute: row.get(3)?,
    })
}

pub fn create(
    conn: &Connection,
    name: &str,
    email: Option<&str>,
    institute: Option<&str>,
) -> Result<Person, TagDbError> {
    conn.execute(
        "INSERT INTO people(name, email, institute) VALUES(?1, ?2, ?3)",
        params![name, email, institute],
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Person, TagDbError> {
    conn.query_row(
        "SELECT id, name, email, institute FROM people WHERE id = ?1",
        params![id],
        row_to_person,
    )
    .optional()?
    .ok_or_else(|| TagDbError::NotFound(format!("person id {}", id)))
}

pub fn list(conn: &Connection) -> Result<Vec<Person>, TagDbError> {
    let mut stmt = conn.prepare("SELECT id, name, email, institute FROM people ORDER BY id")?;
    let rows = stmt.query_map([], row_to_person)?;
    let mut people = Vec::new();
    for r in rows {
        people.push(r?);
    }
    Ok(people)
}

/// Attach a person as an author of a document. Without an explicit
/// position the person is appended after the current last author.
pub fn attach_author(
    conn: &Connection,
    pdf_id: i64,
    person_id: i64,
    position: Option<i64>,
) -> Result<(), TagDbError> {
    get(conn, person_id)?;
    crate::catalog::docs::get(conn, pdf_id)?;
    let position = match position {
        Some(p) => p,
        None => {
            let max: Option<i64> = conn.query_row(
                "SELECT MAX(position) FROM pdf_people WHERE pdf_id = ?1",
                params![pdf_id],
                |row| row.get(0),
            )?;
            max.unwrap_or(0) + 1
        }
    };
    conn.execute(
        "INSERT INTO pdf_people(pdf_id, person_id, position) VALUES(?1, ?2, ?3)",
        params![pdf_id, person_id, position],
    )?;
    Ok(())
}

/// Authors of a document in citation order.
pub fn authors_of(conn: &Connection, pdf_id: i64) -> Result<Vec<Person>, TagDbError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.email, p.institute FROM people p
         JOIN pdf_people pp ON pp.person_id = p.id
         WHERE pp.pdf_id = ?1 ORDER BY pp.position",
    )?;
    let rows = stmt.query_map(params![pdf_id], row_to_person)?;
    let mut people = Vec::new();
    for r in rows {
        people.push(r?);
    }
    Ok(people)
}
