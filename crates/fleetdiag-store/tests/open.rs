use fleetdiag_store::error::StoreErrorKind;
use fleetdiag_store::{Access, Store};
use rusqlite::Connection;
use tempfile::TempDir;

#[test]
fn open_missing_database_is_not_found_and_creates_nothing() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("typo.sqlite3");

    for access in [Access::ReadOnly, Access::ReadWrite] {
        let err = Store::open(&path, access).err().expect("missing db");
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }
    assert!(!path.exists());
}

#[test]
fn open_rejects_database_without_rental_tables() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("other.sqlite3");
    Connection::open(&path)
        .expect("create")
        .execute_batch("CREATE TABLE users (id TEXT PRIMARY KEY);")
        .expect("users table");

    let err = Store::open(&path, Access::ReadOnly).err().expect("missing tables");
    assert_eq!(err.kind(), StoreErrorKind::MissingTable);
    assert!(err.to_string().contains("bookings"));
}

#[test]
fn read_only_open_leaves_file_untouched() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("rental.sqlite3");
    drop(Store::create(&path).expect("create"));
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).expect("chmod");
    }
    let journal: String = Connection::open(&path)
        .expect("reopen")
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("journal mode");

    let store = Store::open(&path, Access::ReadOnly).expect("open read-only");
    assert_eq!(store.users().count().expect("count"), 0);
    assert!(store
        .connection()
        .execute("DELETE FROM users;", [])
        .is_err());
    drop(store);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
    let after: String = Connection::open(&path)
        .expect("reopen")
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("journal mode");
    assert_eq!(after, journal);
    assert!(!temp.path().join("rental.sqlite3-wal").exists());
}
