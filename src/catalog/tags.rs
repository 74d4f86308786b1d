//! Tag tree store: CRUD over tag nodes plus move/reparent and descendant
//! queries over materialized paths.
//!
//! Only the operations the tagging workflow needs are implemented: create,
//! lookup, move, and subtree queries. Rename and delete are intentionally
//! absent.

use crate::catalog::tag_path;
use crate::core::error::TagDbError;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub path: String,
    #[serde(skip)]
    pub icon: Option<Vec<u8>>,
}

fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        icon: row.get(3)?,
    })
}

const TAG_COLUMNS: &str = "id, name, path, icon";

/// Insert a new tag as a root node.
///
/// The row is inserted with `path = NULL` and the path is backfilled to
/// `str(id)` in the same transaction. The two-step write keeps the
/// root-path invariant visible here instead of hiding it in a trigger.
pub fn create(
    conn: &mut Connection,
    name: &str,
    icon: Option<&[u8]>,
) -> Result<Tag, TagDbError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO tags(name, icon, path) VALUES(?1, ?2, NULL)",
        params![name, icon],
    )
    .map_err(|e| TagDbError::from_unique_violation(e, name))?;
    let id = tx.last_insert_rowid();
    tx.execute(
        "UPDATE tags SET path = ?1 WHERE id = ?2 AND path IS NULL",
        params![id.to_string(), id],
    )?;
    tx.commit()?;
    Ok(Tag {
        id,
        name: name.to_string(),
        path: id.to_string(),
        icon: icon.map(|b| b.to_vec()),
    })
}

pub fn get(conn: &Connection, id: i64) -> Result<Tag, TagDbError> {
    conn.query_row(
        &format!("SELECT {} FROM tags WHERE id = ?1", TAG_COLUMNS),
        params![id],
        row_to_tag,
    )
    .optional()?
    .ok_or_else(|| TagDbError::NotFound(format!("tag id {}", id)))
}

pub fn get_by_name(conn: &Connection, name: &str) -> Result<Tag, TagDbError> {
    conn.query_row(
        &format!("SELECT {} FROM tags WHERE name = ?1", TAG_COLUMNS),
        params![name],
        row_to_tag,
    )
    .optional()?
    .ok_or_else(|| TagDbError::NotFound(format!("tag '{}'", name)))
}

/// All tags ordered by path, so ancestors sort before their descendants.
pub fn list(conn: &Connection) -> Result<Vec<Tag>, TagDbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tags ORDER BY path",
        TAG_COLUMNS
    ))?;
    let rows = stmt.query_map([], row_to_tag)?;
    let mut tags = Vec::new();
    for r in rows {
        tags.push(r?);
    }
    Ok(tags)
}

/// Strict descendants of `tag`, ordered by path.
pub fn descendants_of(conn: &Connection, tag: &Tag) -> Result<Vec<Tag>, TagDbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tags WHERE path LIKE ?1 ORDER BY path",
        TAG_COLUMNS
    ))?;
    let rows = stmt.query_map(params![tag_path::descendant_pattern(&tag.path)], row_to_tag)?;
    let mut tags = Vec::new();
    for r in rows {
        tags.push(r?);
    }
    Ok(tags)
}

/// The subtree rooted at `tag`: descendants first, the tag itself last.
/// Callers rely on "self is last"; keep that order.
pub fn all_tags(conn: &Connection, tag: &Tag) -> Result<Vec<Tag>, TagDbError> {
    let mut tags = descendants_of(conn, tag)?;
    tags.push(tag.clone());
    Ok(tags)
}

/// Reparent `tag_id` under `new_parent`, or promote it to a root.
///
/// Moving under a parent rewrites the path of every current descendant by
/// swapping the old prefix for the new one, then updates the node itself;
/// the whole rewrite is one transaction so an interruption never leaves a
/// half-moved subtree.
///
/// Promoting to a root only rewrites the node's own path. Descendants keep
/// their old (now stale) paths; that asymmetry is long-standing observed
/// behavior that callers may depend on, so it is preserved rather than
/// silently cascaded. See the stale-path test in tests/tag_tree.rs.
pub fn move_to(
    conn: &mut Connection,
    tag_id: i64,
    new_parent: Option<i64>,
) -> Result<Tag, TagDbError> {
    let node = get(conn, tag_id)?;
    match new_parent {
        None => {
            conn.execute(
                "UPDATE tags SET path = ?1 WHERE id = ?2",
                params![tag_id.to_string(), tag_id],
            )?;
        }
        Some(parent_id) => {
            let parent = get(conn, parent_id)?;
            let new_path = tag_path::child_path(Some(&parent.path), tag_id);
            let tx = conn.transaction()?;
            // substr() is 1-based: position len(old)+1 keeps the suffix
            // starting at the "." after the old prefix.
            tx.execute(
                "UPDATE tags SET path = ?1 || substr(path, ?2) WHERE path LIKE ?3",
                params![
                    new_path,
                    node.path.len() as i64 + 1,
                    tag_path::descendant_pattern(&node.path)
                ],
            )?;
            tx.execute(
                "UPDATE tags SET path = ?1 WHERE id = ?2",
                params![new_path, tag_id],
            )?;
            tx.commit()?;
        }
    }
    get(conn, tag_id)
}
