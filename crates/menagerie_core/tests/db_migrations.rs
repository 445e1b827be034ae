use menagerie_core::db::migrations::{apply_migrations, latest_version, schema_version};
use menagerie_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{Connection, ErrorCode};

fn insert_row(conn: &Connection, id: &str, extinct: Option<i64>) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO animals (id, species, extinct) VALUES (?1, 'Test', ?2);",
        rusqlite::params![id, extinct],
    )
}

fn seq_of(conn: &Connection, id: &str) -> i64 {
    conn.query_row("SELECT seq FROM animals WHERE id = ?1;", [id], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_store_reaches_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());

    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_table_info('animals') ORDER BY cid;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(
        columns,
        [
            "seq",
            "id",
            "species",
            "extinct",
            "location",
            "life_expectancy",
            "created_at",
            "updated_at"
        ]
    );
}

#[test]
fn seq_is_never_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    insert_row(&conn, "a", None).unwrap();
    insert_row(&conn, "b", None).unwrap();
    let last = seq_of(&conn, "b");

    conn.execute("DELETE FROM animals;", []).unwrap();
    insert_row(&conn, "c", None).unwrap();

    assert!(seq_of(&conn, "c") > last);
}

#[test]
fn extinct_column_only_accepts_flags() {
    let conn = open_db_in_memory().unwrap();
    insert_row(&conn, "living", Some(0)).unwrap();
    insert_row(&conn, "lost", Some(1)).unwrap();
    insert_row(&conn, "unknown", None).unwrap();

    let err = insert_row(&conn, "bad", Some(2)).unwrap_err();
    assert_eq!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation));
}

#[test]
fn duplicate_ids_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    insert_row(&conn, "same", None).unwrap();

    let err = insert_row(&conn, "same", None).unwrap_err();
    assert_eq!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation));
}

#[test]
fn timestamps_default_on_insert() {
    let conn = open_db_in_memory().unwrap();
    insert_row(&conn, "stamped", None).unwrap();

    let (created_at, updated_at): (i64, i64) = conn
        .query_row(
            "SELECT created_at, updated_at FROM animals WHERE id = 'stamped';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(created_at > 0);
    assert_eq!(created_at, updated_at);
}

#[test]
fn reopening_file_store_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menagerie.db");

    let conn = open_db(&path).unwrap();
    insert_row(&conn, "kept", Some(1)).unwrap();
    drop(conn);

    let mut reopened = open_db(&path).unwrap();
    let upgrade = apply_migrations(&mut reopened).unwrap();
    assert!(upgrade.is_noop());
    assert_eq!(upgrade.to, latest_version());
    assert_eq!(seq_of(&reopened, "kept"), 1);
}

#[test]
fn store_from_newer_build_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", 42).unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'animals';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
    assert_eq!(schema_version(&conn).unwrap(), 42);
}
