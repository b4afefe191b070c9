use fleetdiag_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM fleetdiag_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, 1);
    assert_eq!(store.schema_version().expect("schema version"), 1);
}

#[test]
fn migrations_reject_newer_database() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
        .connection()
        .execute("UPDATE fleetdiag_schema SET version = 99;", [])
        .expect("bump version");

    let err = store.migrate().unwrap_err();
    assert!(err.to_string().contains("newer than available migrations"));
}
