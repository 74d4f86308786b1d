use pdftags::catalog::{bib, docs, journals, people, tags};
use pdftags::core::error::TagDbError;
use pdftags::core::store::Store;
use rusqlite::Connection;
use tempfile::{TempDir, tempdir};

fn test_conn() -> (TempDir, Connection) {
    let tmp = tempdir().expect("tempdir");
    let store = Store {
        root: tmp.path().to_path_buf(),
    };
    store.initialize().expect("store init");
    let conn = store.open().expect("store open");
    (tmp, conn)
}

#[test]
fn open_without_init_is_not_found() {
    let tmp = tempdir().expect("tempdir");
    let store = Store {
        root: tmp.path().to_path_buf(),
    };
    assert!(matches!(store.open(), Err(TagDbError::NotFound(_))));
}

#[test]
fn initialize_is_idempotent() {
    let tmp = tempdir().expect("tempdir");
    let store = Store {
        root: tmp.path().to_path_buf(),
    };
    store.initialize().expect("first init");
    store.initialize().expect("second init");
    store.open().expect("open");
}

#[test]
fn register_and_fetch_document() {
    let (_tmp, conn) = test_conn();
    let pdf = docs::register(
        &conn,
        &docs::NewPdf {
            path: Some("/papers/ion-traps.pdf".to_string()),
            md5: Some("d41d8cd98f00b204e9800998ecf8427e".to_string()),
            title: Some("Ion traps".to_string()),
            ..Default::default()
        },
    )
    .expect("register");

    assert!(pdf.date.is_some());
    assert!(!pdf.metadata_complete);

    let by_md5 = docs::find_by_md5(&conn, "d41d8cd98f00b204e9800998ecf8427e")
        .expect("find")
        .expect("present");
    assert_eq!(by_md5.id, pdf.id);
    assert!(
        docs::find_by_md5(&conn, "0000")
            .expect("find")
            .is_none()
    );
}

#[test]
fn tag_association_allows_duplicates() {
    let (_tmp, mut conn) = test_conn();
    let tag = tags::create(&mut conn, "plasma", None).expect("tag");
    let pdf = docs::register(&conn, &docs::NewPdf::default()).expect("register");

    docs::add_tag(&conn, pdf.id, tag.id).expect("first add");
    docs::add_tag(&conn, pdf.id, tag.id).expect("duplicate add");
    assert_eq!(docs::tags_of(&conn, pdf.id).expect("tags").len(), 2);

    // remove_tag detaches one instance at a time
    docs::remove_tag(&conn, pdf.id, tag.id).expect("remove");
    assert_eq!(docs::tags_of(&conn, pdf.id).expect("tags").len(), 1);
}

#[test]
fn removing_absent_tag_is_a_reported_noop() {
    let (_tmp, mut conn) = test_conn();
    let attached = tags::create(&mut conn, "attached", None).expect("tag");
    let absent = tags::create(&mut conn, "absent", None).expect("tag");
    let pdf = docs::register(&conn, &docs::NewPdf::default()).expect("register");
    docs::add_tag(&conn, pdf.id, attached.id).expect("add");

    // Succeeds without error and leaves the tag set unchanged.
    docs::remove_tag(&conn, pdf.id, absent.id).expect("noop remove");
    let current = docs::tags_of(&conn, pdf.id).expect("tags");
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, attached.id);
}

#[test]
fn tagging_missing_document_or_tag_fails() {
    let (_tmp, mut conn) = test_conn();
    let tag = tags::create(&mut conn, "t", None).expect("tag");
    let pdf = docs::register(&conn, &docs::NewPdf::default()).expect("register");

    assert!(matches!(
        docs::add_tag(&conn, 9999, tag.id),
        Err(TagDbError::NotFound(_))
    ));
    assert!(matches!(
        docs::add_tag(&conn, pdf.id, 9999),
        Err(TagDbError::NotFound(_))
    ));
}

#[test]
fn version_links_and_metadata_flag() {
    let (_tmp, conn) = test_conn();
    let newer = docs::register(&conn, &docs::NewPdf::default()).expect("newer");
    let older = docs::register(&conn, &docs::NewPdf::default()).expect("older");

    docs::set_other_version(&conn, newer.id, older.id).expect("link");
    assert_eq!(
        docs::get(&conn, newer.id).expect("get").other_versions,
        Some(older.id)
    );

    docs::set_metadata_complete(&conn, newer.id, true).expect("flag");
    assert!(docs::get(&conn, newer.id).expect("get").metadata_complete);
}

#[test]
fn journals_are_unique_and_get_or_create_reuses() {
    let (_tmp, conn) = test_conn();
    let j1 = journals::create(&conn, "Phys. Rev. A").expect("create");
    let err = journals::create(&conn, "Phys. Rev. A").unwrap_err();
    assert!(matches!(err, TagDbError::DuplicateName(_)));

    let j2 = journals::get_or_create(&conn, "Phys. Rev. A").expect("reuse");
    assert_eq!(j1.id, j2.id);
    let j3 = journals::get_or_create(&conn, "Nature").expect("new");
    assert_ne!(j1.id, j3.id);
}

#[test]
fn citation_contains_all_present_fields() {
    let (_tmp, conn) = test_conn();
    let journal = journals::create(&conn, "Phys. Rev. A").expect("journal");
    let pdf = docs::register(
        &conn,
        &docs::NewPdf {
            title: Some("A paper about ions".to_string()),
            doi: Some("10.1000/xyz123".to_string()),
            journal_id: Some(journal.id),
            volume: Some("12".to_string()),
            number: Some("3".to_string()),
            pages: Some("100-110".to_string()),
            year: Some(2016),
            ..Default::default()
        },
    )
    .expect("register");

    let first = people::create(&conn, "A. Persaud", None, Some("LBNL")).expect("p1");
    let second = people::create(&conn, "B. Author", None, None).expect("p2");
    people::attach_author(&conn, pdf.id, first.id, None).expect("attach 1");
    people::attach_author(&conn, pdf.id, second.id, None).expect("attach 2");

    let record = bib::citation(&conn, pdf.id).expect("citation");
    assert!(record.contains("author: A. Persaud and B. Author"));
    assert!(record.contains("title: A paper about ions"));
    assert!(record.contains("journal: Phys. Rev. A"));
    assert!(record.contains("volume: 12"));
    assert!(record.contains("number: 3"));
    assert!(record.contains("pages: 100-110"));
    assert!(record.contains("year: 2016"));
    assert!(record.contains("doi: 10.1000/xyz123"));
    assert!(record.contains("url: https://doi.org/10.1000/xyz123"));
}

#[test]
fn citation_omits_absent_fields_entirely() {
    let (_tmp, conn) = test_conn();
    let pdf = docs::register(
        &conn,
        &docs::NewPdf {
            title: Some("No doi here".to_string()),
            year: Some(2020),
            ..Default::default()
        },
    )
    .expect("register");

    let record = bib::citation(&conn, pdf.id).expect("citation");
    assert!(record.contains("title: No doi here"));
    assert!(record.contains("year: 2020"));
    // Missing doi drops both the doi line and the derived url line.
    assert!(!record.contains("doi:"));
    assert!(!record.contains("url:"));
    // No blank lines for the other absent fields either.
    assert!(record.lines().all(|l| !l.trim().is_empty()));
    assert!(!record.contains("journal:"));
    assert!(!record.contains("author:"));
}

#[test]
fn authors_keep_explicit_positions() {
    let (_tmp, conn) = test_conn();
    let pdf = docs::register(&conn, &docs::NewPdf::default()).expect("register");
    let first = people::create(&conn, "First", None, None).expect("p1");
    let second = people::create(&conn, "Second", None, None).expect("p2");

    // Attach out of order with explicit positions.
    people::attach_author(&conn, pdf.id, second.id, Some(2)).expect("attach 2");
    people::attach_author(&conn, pdf.id, first.id, Some(1)).expect("attach 1");

    let authors = people::authors_of(&conn, pdf.id).expect("authors");
    let names: Vec<&str> = authors.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}
