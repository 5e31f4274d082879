use pagecraft_core::db::migrations::latest_version;
use pagecraft_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_object_exists(&conn, "table", "landing_pages");
    assert_object_exists(&conn, "index", "idx_landing_pages_published_slug");
    assert_object_exists(&conn, "index", "idx_landing_pages_updated_at");
}

#[test]
fn reopening_a_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagecraft.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_object_exists(&second, "table", "landing_pages");
}

#[test]
fn database_from_a_newer_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slug_column_is_unique_and_title_must_be_non_blank() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO landing_pages (id, title, slug) VALUES ('a', 'One', 'same');",
        [],
    )
    .unwrap();

    let duplicate = conn.execute(
        "INSERT INTO landing_pages (id, title, slug) VALUES ('b', 'Two', 'same');",
        [],
    );
    assert!(duplicate.is_err());

    let blank_title = conn.execute(
        "INSERT INTO landing_pages (id, title, slug) VALUES ('c', '   ', 'other');",
        [],
    );
    assert!(blank_title.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
