//! Materialized-path codec for the tag tree.
//!
//! A tag's path is the dot-separated chain of ancestor ids ending in the
//! tag's own id: `"3.7.12"` means node 12 under 7 under 3. The codec and
//! the descendant query share the `.` delimiter through
//! [`descendant_pattern`], so `"1"` can never match the subtree of `"12"`.

use crate::core::error::TagDbError;

/// Path of a child with the given id under `parent_path`. No parent means
/// the node is a root and its path is just its own id.
pub fn child_path(parent_path: Option<&str>, id: i64) -> String {
    match parent_path {
        Some(p) => format!("{}.{}", p, id),
        None => id.to_string(),
    }
}

/// Decode a path into its ordered ancestor-id chain, root first.
///
/// A malformed path here means the write-path invariants were violated
/// somewhere else; it is surfaced as `CorruptPath`, not tolerated.
pub fn decode(path: &str) -> Result<Vec<i64>, TagDbError> {
    path.split('.')
        .map(|seg| {
            seg.parse::<i64>()
                .map_err(|_| TagDbError::CorruptPath(path.to_string()))
        })
        .collect()
}

/// Tree depth encoded in a path (a root has depth 0).
pub fn depth(path: &str) -> Result<usize, TagDbError> {
    Ok(decode(path)?.len() - 1)
}

/// SQL LIKE pattern matching strict descendants of `path`. The literal `.`
/// anchor is what keeps sibling prefixes like `"1"` and `"12"` apart.
pub fn descendant_pattern(path: &str) -> String {
    format!("{}.%", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_path_appends_id() {
        assert_eq!(child_path(Some("3.7"), 12), "3.7.12");
        assert_eq!(child_path(None, 5), "5");
    }

    #[test]
    fn decode_round_trips() {
        assert_eq!(decode("3.7.12").unwrap(), vec![3, 7, 12]);
        assert_eq!(decode("4").unwrap(), vec![4]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("3..7"), Err(TagDbError::CorruptPath(_))));
        assert!(matches!(decode("a.b"), Err(TagDbError::CorruptPath(_))));
        assert!(matches!(decode(""), Err(TagDbError::CorruptPath(_))));
    }

    #[test]
    fn depth_counts_ancestors() {
        assert_eq!(depth("4").unwrap(), 0);
        assert_eq!(depth("3.7.12").unwrap(), 2);
    }

    #[test]
    fn pattern_is_dot_anchored() {
        assert_eq!(descendant_pattern("1"), "1.%");
        // "12" does not match "1.%" under LIKE; that is the whole point.
    }
}
