use crate::core::error::TagDbError;
use crate::core::schemas;
use rusqlite::Connection;

pub fn db_connect(db_path: &str) -> Result<Connection, TagDbError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(TagDbError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(TagDbError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(TagDbError::RusqliteError)?;
    Ok(conn)
}

/// Create every table and index, idempotently.
pub fn initialize_db(conn: &Connection) -> Result<(), TagDbError> {
    for stmt in schemas::all_statements() {
        conn.execute(stmt, [])?;
    }
    log::debug!("schema initialized ({} statements)", schemas::all_statements().len());
    Ok(())
}
