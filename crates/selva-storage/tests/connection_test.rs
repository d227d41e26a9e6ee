//! File-backed connection tests: open, reopen, migration idempotency.

use selva_storage::connection;
use selva_storage::queries::users;

#[test]
fn open_creates_and_migrates_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selva.db");

    let conn = connection::open(&path).unwrap();
    let version: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0)).unwrap();
    assert!(version >= 1);

    let journal: String =
        conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)).unwrap();
    assert_eq!(journal.to_lowercase(), "wal");
}

#[test]
fn data_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selva.db");

    let user_id = {
        let conn = connection::open(&path).unwrap();
        users::insert(&conn, "Rosa", "rosa@example.org", true).unwrap()
    };

    // Reopening reapplies pragmas and skips already-applied migrations.
    let conn = connection::open(&path).unwrap();
    let user = users::find(&conn, user_id).unwrap().unwrap();
    assert_eq!(user.email, "rosa@example.org");
    assert!(user.notify_by_email);
}
