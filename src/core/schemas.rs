//! Centralized SQLite schema definitions for the pdftags database.
//!
//! All tables live in a single database file:
//! - tags: hierarchical tag tree (materialized paths)
//! - pdfs: one row per registered document
//! - people / journals: bibliographic entities
//! - pdf_tag / pdf_people: many-to-many association tables

pub const DB_NAME: &str = "pdftags.db";

pub const TAGS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        icon BLOB,
        path TEXT
    )
";
pub const TAGS_PATH_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_tags_path ON tags(path)";

pub const JOURNALS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS journals (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
";

pub const PEOPLE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS people (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        institute TEXT
    )
";

pub const PDFS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS pdfs (
        id INTEGER PRIMARY KEY,
        date TEXT,
        comment TEXT,
        path TEXT,
        md5 TEXT,
        other_versions INTEGER REFERENCES pdfs(id),
        metadata_complete INTEGER NOT NULL DEFAULT 0,
        title TEXT,
        doi TEXT,
        journal_id INTEGER REFERENCES journals(id),
        volume TEXT,
        number TEXT,
        pages TEXT,
        year INTEGER
    )
";
pub const PDFS_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_pdfs_date ON pdfs(date)";
pub const PDFS_MD5_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_pdfs_md5 ON pdfs(md5)";

// No uniqueness on (pdf_id, tag_id): a tag may be attached to the same
// document more than once.
pub const PDF_TAG_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS pdf_tag (
        pdf_id INTEGER NOT NULL REFERENCES pdfs(id),
        tag_id INTEGER NOT NULL REFERENCES tags(id)
    )
";

// position fixes author order for bibliography output.
pub const PDF_PEOPLE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS pdf_people (
        pdf_id INTEGER NOT NULL REFERENCES pdfs(id),
        person_id INTEGER NOT NULL REFERENCES people(id),
        position INTEGER NOT NULL
    )
";

/// Every statement needed to bring a fresh database up to the full schema,
/// in dependency order.
pub fn all_statements() -> [&'static str; 9] {
    [
        TAGS_SCHEMA,
        TAGS_PATH_INDEX,
        JOURNALS_SCHEMA,
        PEOPLE_SCHEMA,
        PDFS_SCHEMA,
        PDFS_DATE_INDEX,
        PDFS_MD5_INDEX,
        PDF_TAG_SCHEMA,
        PDF_PEOPLE_SCHEMA,
    ]
}
