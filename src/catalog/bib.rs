//! Plain-text citation records.
//!
//! A citation is a block of `field: value` lines. Fields without a value
//! are omitted entirely; in particular a missing doi drops both the doi
//! line and the derived URL line.

use crate::catalog::{docs, journals, people};
use crate::core::error::TagDbError;
use rusqlite::Connection;

/// Render the citation record for a document.
pub fn citation(conn: &Connection, pdf_id: i64) -> Result<String, TagDbError> {
    let pdf = docs::get(conn, pdf_id)?;
    let authors = people::authors_of(conn, pdf_id)?;

    let mut lines = Vec::new();
    if !authors.is_empty() {
        let names: Vec<&str> = authors.iter().map(|p| p.name.as_str()).collect();
        lines.push(format!("author: {}", names.join(" and ")));
    }
    if let Some(title) = &pdf.title {
        lines.push(format!("title: {}", title));
    }
    if let Some(journal_id) = pdf.journal_id {
        let journal = journals::get(conn, journal_id)?;
        lines.push(format!("journal: {}", journal.name));
    }
    if let Some(volume) = &pdf.volume {
        lines.push(format!("volume: {}", volume));
    }
    if let Some(number) = &pdf.number {
        lines.push(format!("number: {}", number));
    }
    if let Some(pages) = &pdf.pages {
        lines.push(format!("pages: {}", pages));
    }
    if let Some(year) = pdf.year {
        lines.push(format!("year: {}", year));
    }
    if let Some(doi) = &pdf.doi {
        lines.push(format!("doi: {}", doi));
        lines.push(format!("url: https://doi.org/{}", doi));
    }
    Ok(lines.join("\n"))
}
