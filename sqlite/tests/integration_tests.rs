//! Integration tests for the plugin-installer-sqlite crate.

use plugin_installer_core::{AuthStore, LinkFilter, LinkTable, SchemaConn};
use plugin_installer_sqlite::SqliteStore;
use rusqlite::Connection;

fn fresh_store(prefix: &str) -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    let store = SqliteStore::new(conn, prefix).unwrap();
    store.setup().unwrap();
    store
}

#[test]
fn setup_and_teardown_round_trip() {
    let store = fresh_store("wolf_");
    assert_eq!(store.probe("wolf_permission").unwrap(), 0);
    assert_eq!(store.probe("wolf_role").unwrap(), 0);
    assert_eq!(store.probe("wolf_role_permission").unwrap(), 0);
    assert_eq!(store.probe("wolf_user_role").unwrap(), 0);

    store.teardown().unwrap();
    assert!(store.probe("wolf_permission").is_err());
    assert!(store.probe("wolf_role").is_err());
}

#[test]
fn teardown_without_setup_is_fine() {
    let conn = Connection::open_in_memory().unwrap();
    let store = SqliteStore::new(conn, "wolf_").unwrap();
    store.teardown().unwrap();
}

#[test]
fn prefixes_isolate_installations() {
    let conn = Connection::open_in_memory().unwrap();
    let first = SqliteStore::new(conn, "a_").unwrap();
    first.setup().unwrap();
    first.insert_role("editor").unwrap();

    let second = SqliteStore::new(first.into_connection(), "b_").unwrap();
    second.setup().unwrap();
    assert!(second.find_role("editor").unwrap().is_none());
}

#[test]
fn execute_is_raw_sql() {
    let store = fresh_store("wolf_");
    store
        .execute("CREATE TABLE widgets (id INTEGER PRIMARY KEY, label TEXT)")
        .unwrap();
    assert_eq!(store.probe("widgets").unwrap(), 0);

    store.execute("INSERT INTO widgets (label) VALUES ('a')").unwrap();
    assert_eq!(store.probe("widgets").unwrap(), 1);
}

#[test]
fn duplicate_names_are_not_rejected_by_the_schema() {
    // Uniqueness is the provisioning layer's job, by lookup-before-insert.
    let store = fresh_store("wolf_");
    assert!(store.insert_permission("edit").unwrap());
    assert!(store.insert_permission("edit").unwrap());
}

#[test]
fn user_role_links_are_countable_and_deletable() {
    let store = fresh_store("wolf_");
    store.insert_role("editor").unwrap();
    let role = store.find_role("editor").unwrap().unwrap();

    store
        .execute(&format!(
            "INSERT INTO wolf_user_role (user_id, role_id) VALUES (7, {0}), (8, {0})",
            role.id
        ))
        .unwrap();
    assert_eq!(
        store
            .count_links(LinkTable::UserRole, LinkFilter::Role(role.id))
            .unwrap(),
        2
    );

    store
        .delete_links(LinkTable::UserRole, LinkFilter::Role(role.id))
        .unwrap();
    assert_eq!(
        store
            .count_links(LinkTable::UserRole, LinkFilter::Role(role.id))
            .unwrap(),
        0
    );
}
