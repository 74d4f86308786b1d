//! Document store: one row per registered PDF plus the many-to-many tag
//! association.

use crate::catalog::tags::{self, Tag};
use crate::core::error::TagDbError;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pdf {
    pub id: i64,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub path: Option<String>,
    pub md5: Option<String>,
    /// Older version of this document, if any (linked list over pdfs.id).
    pub other_versions: Option<i64>,
    pub metadata_complete: bool,
    pub title: Option<String>,
    pub doi: Option<String>,
    pub journal_id: Option<i64>,
    pub volume: Option<String>,
    pub number: Option<String>,
    pub pages: Option<String>,
    pub year: Option<i64>,
}

/// Fields supplied when registering a document. Everything is optional;
/// metadata can be filled in later.
#[derive(Debug, Clone, Default)]
pub struct NewPdf {
    pub path: Option<String>,
    pub md5: Option<String>,
    pub comment: Option<String>,
    pub title: Option<String>,
    pub doi: Option<String>,
    pub journal_id: Option<i64>,
    pub volume: Option<String>,
    pub number: Option<String>,
    pub pages: Option<String>,
    pub year: Option<i64>,
}

const PDF_COLUMNS: &str = "id, date, comment, path, md5, other_versions, \
                           metadata_complete, title, doi, journal_id, volume, number, pages, year";

fn row_to_pdf(row: &rusqlite::Row) -> rusqlite::Result<Pdf> {
    Ok(Pdf {
        id: row.get(0)?,
        date: row.get(1)?,
        comment: row.get(2)?,
        path: row.get(3)?,
        md5: row.get(4)?,
        other_versions: row.get(5)?,
        metadata_complete: row.get::<_, i64>(6)? != 0,
        title: row.get(7)?,
        doi: row.get(8)?,
        journal_id: row.get(9)?,
        volume: row.get(10)?,
        number: row.get(11)?,
        pages: row.get(12)?,
        year: row.get(13)?,
    })
}

fn now_iso() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

/// Register a document. The registration date is recorded automatically.
pub fn register(conn: &Connection, new: &NewPdf) -> Result<Pdf, TagDbError> {
    conn.execute(
        "INSERT INTO pdfs(date, comment, path, md5, title, doi, journal_id, volume, number, pages, year)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            now_iso(),
            new.comment,
            new.path,
            new.md5,
            new.title,
            new.doi,
            new.journal_id,
            new.volume,
            new.number,
            new.pages,
            new.year
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Pdf, TagDbError> {
    conn.query_row(
        &format!("SELECT {} FROM pdfs WHERE id = ?1", PDF_COLUMNS),
        params![id],
        row_to_pdf,
    )
    .optional()?
    .ok_or_else(|| TagDbError::NotFound(format!("pdf id {}", id)))
}

pub fn list(conn: &Connection) -> Result<Vec<Pdf>, TagDbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM pdfs ORDER BY id", PDF_COLUMNS))?;
    let rows = stmt.query_map([], row_to_pdf)?;
    let mut pdfs = Vec::new();
    for r in rows {
        pdfs.push(r?);
    }
    Ok(pdfs)
}

/// Lookup by checksum; used to spot already-registered files.
pub fn find_by_md5(conn: &Connection, md5: &str) -> Result<Option<Pdf>, TagDbError> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM pdfs WHERE md5 = ?1", PDF_COLUMNS),
            params![md5],
            row_to_pdf,
        )
        .optional()?)
}

/// Attach `tag_id` to the document. Duplicate attachments are permitted.
pub fn add_tag(conn: &Connection, pdf_id: i64, tag_id: i64) -> Result<(), TagDbError> {
    get(conn, pdf_id)?;
    tags::get(conn, tag_id)?;
    conn.execute(
        "INSERT INTO pdf_tag(pdf_id, tag_id) VALUES(?1, ?2)",
        params![pdf_id, tag_id],
    )?;
    Ok(())
}

/// Detach one instance of `tag_id` from the document.
///
/// If the tag is not attached the operation still succeeds; the condition
/// is logged with the tag's name and the document's current tags.
pub fn remove_tag(conn: &Connection, pdf_id: i64, tag_id: i64) -> Result<(), TagDbError> {
    let pdf = get(conn, pdf_id)?;
    let tag = tags::get(conn, tag_id)?;
    let removed = conn.execute(
        "DELETE FROM pdf_tag WHERE rowid IN
             (SELECT rowid FROM pdf_tag WHERE pdf_id = ?1 AND tag_id = ?2 LIMIT 1)",
        params![pdf_id, tag_id],
    )?;
    if removed == 0 {
        let current: Vec<String> = tags_of(conn, pdf_id)?
            .into_iter()
            .map(|t| t.name)
            .collect();
        log::warn!(
            "tag '{}' not found for {} with tags: {}",
            tag.name,
            pdf.path.as_deref().unwrap_or("<no path>"),
            current.join(",")
        );
    }
    Ok(())
}

/// Tags currently attached to the document, in attachment order.
pub fn tags_of(conn: &Connection, pdf_id: i64) -> Result<Vec<Tag>, TagDbError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.path, t.icon FROM tags t
         JOIN pdf_tag pt ON pt.tag_id = t.id
         WHERE pt.pdf_id = ?1 ORDER BY pt.rowid",
    )?;
    let rows = stmt.query_map(params![pdf_id], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
            path: row.get(2)?,
            icon: row.get(3)?,
        })
    })?;
    let mut result = Vec::new();
    for r in rows {
        result.push(r?);
    }
    Ok(result)
}

/// Link `older_pdf_id` as the previous version of `pdf_id`.
pub fn set_other_version(
    conn: &Connection,
    pdf_id: i64,
    older_pdf_id: i64,
) -> Result<(), TagDbError> {
    get(conn, pdf_id)?;
    get(conn, older_pdf_id)?;
    conn.execute(
        "UPDATE pdfs SET other_versions = ?1 WHERE id = ?2",
        params![older_pdf_id, pdf_id],
    )?;
    Ok(())
}

/// Mark a document's bibliographic metadata as complete (or not).
pub fn set_metadata_complete(
    conn: &Connection,
    pdf_id: i64,
    complete: bool,
) -> Result<(), TagDbError> {
    get(conn, pdf_id)?;
    conn.execute(
        "UPDATE pdfs SET metadata_complete = ?1 WHERE id = ?2",
        params![complete as i64, pdf_id],
    )?;
    Ok(())
}
