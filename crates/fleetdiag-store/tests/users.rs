use fleetdiag_store::repo::UserNew;
use fleetdiag_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

#[test]
fn find_by_email_ignores_case_and_whitespace() {
    let store = store();
    let created = store
        .users()
        .create(
            1_700_000_000,
            UserNew {
                email: "Rider@Example.com".to_string(),
                full_name: " Asha Rao ".to_string(),
                phone: Some("+91 98000 00000".to_string()),
            },
        )
        .expect("create user");
    assert_eq!(created.email, "rider@example.com");
    assert_eq!(created.full_name, "Asha Rao");

    let found = store
        .users()
        .find_by_email("  RIDER@example.COM ")
        .expect("lookup")
        .expect("user");
    assert_eq!(found.id, created.id);
    assert_eq!(store.users().get(created.id).expect("get"), Some(found));
    assert_eq!(store.users().count().expect("count"), 1);
}

#[test]
fn find_by_email_returns_none_when_missing() {
    let store = store();
    let found = store
        .users()
        .find_by_email("nobody@example.com")
        .expect("lookup");
    assert!(found.is_none());
}

#[test]
fn find_by_email_rejects_invalid_address() {
    let store = store();
    assert!(store.users().find_by_email("not-an-email").is_err());
}

#[test]
fn rows_with_malformed_ids_surface_as_errors() {
    let store = store();
    store
        .connection()
        .execute(
            "INSERT INTO users (id, email, full_name, created_at)
             VALUES ('legacy-7', 'legacy@example.com', 'Legacy', 0);",
            [],
        )
        .expect("insert raw row");
    let err = store
        .users()
        .find_by_email("legacy@example.com")
        .unwrap_err();
    assert!(err.to_string().contains("legacy-7"));
}
