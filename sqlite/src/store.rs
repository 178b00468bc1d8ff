//! SQLite implementation of the core storage traits.
//!
//! [`SqliteStore`] owns a [`rusqlite::Connection`] and a table prefix, and
//! implements both [`SchemaConn`] (raw probes and statements) and
//! [`AuthStore`] (the role-permission registry). One store per installer
//! run; the connection is supplied by the host application.
//!
//! # Example
//!
//! ```
//! use plugin_installer_sqlite::SqliteStore;
//! use plugin_installer_core::AuthStore;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! let store = SqliteStore::new(conn, "wolf_").unwrap();
//! store.setup().unwrap();
//!
//! store.insert_permission("gallery_view").unwrap();
//! let p = store.find_permission("gallery_view").unwrap().unwrap();
//! assert_eq!(p.name, "gallery_view");
//! ```

use plugin_installer_core::{
    AuthStore, LinkFilter, LinkTable, Permission, Role, RolePermission, SchemaConn, StoreError,
    validate_identifier,
};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::schema::{generate_drop_sql, generate_schema_sql, validate_prefix};

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// SQLite-backed store for provisioning operations.
pub struct SqliteStore {
    conn: Connection,
    prefix: String,
}

impl SqliteStore {
    /// Creates a store over the given connection and table prefix.
    ///
    /// The prefix may be empty for a dedicated database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] if the prefix contains
    /// characters other than alphanumerics and underscores.
    pub fn new(conn: Connection, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { conn, prefix })
    }

    /// Creates the authorization tables if they do not exist.
    pub fn setup(&self) -> Result<(), StoreError> {
        let sql = generate_schema_sql(&self.prefix)?;
        self.conn.execute_batch(&sql).map_err(backend)
    }

    /// Drops the authorization tables, link tables first.
    pub fn teardown(&self) -> Result<(), StoreError> {
        let sql = generate_drop_sql(&self.prefix)?;
        self.conn.execute_batch(&sql).map_err(backend)
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the store and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn table(&self, base: &str) -> String {
        format!("{}{}", self.prefix, base)
    }

    fn link_table(&self, table: LinkTable) -> String {
        match table {
            LinkTable::UserRole => self.table("user_role"),
            LinkTable::RolePermission => self.table("role_permission"),
        }
    }

    fn find_named(&self, base: &str, name: &str) -> Result<Option<(i64, String)>, StoreError> {
        let sql = format!(
            "SELECT id, name FROM {} WHERE name = ?1 LIMIT 1",
            self.table(base)
        );
        self.conn
            .query_row(&sql, params![name], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()
            .map_err(backend)
    }

    fn insert_named(&self, base: &str, name: &str) -> Result<bool, StoreError> {
        let sql = format!("INSERT INTO {} (name) VALUES (?1)", self.table(base));
        match self.conn.execute(&sql, params![name]) {
            Ok(n) => Ok(n == 1),
            Err(e) => {
                debug!(table = base, name, error = %e, "Insert rejected");
                Ok(false)
            }
        }
    }

    fn rename_named(&self, base: &str, id: i64, name: &str) -> Result<(), StoreError> {
        let sql = format!("UPDATE {} SET name = ?1 WHERE id = ?2", self.table(base));
        self.conn.execute(&sql, params![name, id]).map_err(backend)?;
        Ok(())
    }

    fn delete_by_id(&self, base: &str, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", self.table(base));
        self.conn.execute(&sql, params![id]).map_err(backend)?;
        Ok(())
    }

    fn count_by_id(&self, base: &str, id: i64) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?1", self.table(base));
        let count: i64 = self
            .conn
            .query_row(&sql, params![id], |row| row.get(0))
            .map_err(backend)?;
        Ok(count as u64)
    }

    /// WHERE fragment and bound values for a link filter.
    fn filter_clause(filter: LinkFilter) -> (&'static str, Vec<i64>) {
        match filter {
            LinkFilter::Role(id) => ("role_id = ?1", vec![id]),
            LinkFilter::Permission(id) => ("permission_id = ?1", vec![id]),
            LinkFilter::Grant {
                role_id,
                permission_id,
            } => ("role_id = ?1 AND permission_id = ?2", vec![role_id, permission_id]),
        }
    }
}

impl SchemaConn for SqliteStore {
    fn probe(&self, table: &str) -> Result<u64, StoreError> {
        validate_identifier(table)?;
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(backend)?;
        Ok(count as u64)
    }

    fn execute(&self, statement: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(statement).map_err(backend)
    }

    fn driver_name(&self) -> &'static str {
        "sqlite"
    }
}

impl AuthStore for SqliteStore {
    fn find_permission(&self, name: &str) -> Result<Option<Permission>, StoreError> {
        Ok(self
            .find_named("permission", name)?
            .map(|(id, name)| Permission { id, name }))
    }

    fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError> {
        Ok(self
            .find_named("role", name)?
            .map(|(id, name)| Role { id, name }))
    }

    fn insert_permission(&self, name: &str) -> Result<bool, StoreError> {
        self.insert_named("permission", name)
    }

    fn insert_role(&self, name: &str) -> Result<bool, StoreError> {
        self.insert_named("role", name)
    }

    fn rename_permission(&self, id: i64, name: &str) -> Result<(), StoreError> {
        self.rename_named("permission", id, name)
    }

    fn rename_role(&self, id: i64, name: &str) -> Result<(), StoreError> {
        self.rename_named("role", id, name)
    }

    fn delete_permission(&self, id: i64) -> Result<(), StoreError> {
        self.delete_by_id("permission", id)
    }

    fn delete_role(&self, id: i64) -> Result<(), StoreError> {
        self.delete_by_id("role", id)
    }

    fn count_permissions(&self, id: i64) -> Result<u64, StoreError> {
        self.count_by_id("permission", id)
    }

    fn count_roles(&self, id: i64) -> Result<u64, StoreError> {
        self.count_by_id("role", id)
    }

    fn insert_grant(&self, grant: RolePermission) -> Result<bool, StoreError> {
        let sql = format!(
            "INSERT INTO {} (role_id, permission_id) VALUES (?1, ?2)",
            self.table("role_permission")
        );
        match self
            .conn
            .execute(&sql, params![grant.role_id, grant.permission_id])
        {
            Ok(n) => Ok(n == 1),
            Err(e) => {
                debug!(
                    role_id = grant.role_id,
                    permission_id = grant.permission_id,
                    error = %e,
                    "Grant insert rejected"
                );
                Ok(false)
            }
        }
    }

    fn delete_links(&self, table: LinkTable, filter: LinkFilter) -> Result<(), StoreError> {
        let (clause, values) = Self::filter_clause(filter);
        let sql = format!("DELETE FROM {} WHERE {clause}", self.link_table(table));
        self.conn
            .execute(&sql, rusqlite::params_from_iter(values))
            .map_err(backend)?;
        Ok(())
    }

    fn count_links(&self, table: LinkTable, filter: LinkFilter) -> Result<u64, StoreError> {
        let (clause, values) = Self::filter_clause(filter);
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {clause}",
            self.link_table(table)
        );
        let count: i64 = self
            .conn
            .query_row(&sql, rusqlite::params_from_iter(values), |row| row.get(0))
            .map_err(backend)?;
        Ok(count as u64)
    }

    fn role_has_permission(&self, role: &Role, permission: &str) -> Result<bool, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {links} l JOIN {perms} p ON p.id = l.permission_id \
             WHERE l.role_id = ?1 AND p.name = ?2",
            links = self.table("role_permission"),
            perms = self.table("permission"),
        );
        let count: i64 = self
            .conn
            .query_row(&sql, params![role.id, permission], |row| row.get(0))
            .map_err(backend)?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteStore::new(conn, "wolf_").unwrap();
        store.setup().unwrap();
        store
    }

    #[test]
    fn test_new_validates_prefix() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(SqliteStore::new(conn, "drop;--").is_err());
        let conn = Connection::open_in_memory().unwrap();
        assert!(SqliteStore::new(conn, "").is_ok());
    }

    #[test]
    fn test_setup_is_idempotent() {
        let s = store();
        s.setup().unwrap();
        assert!(s.find_role("anything").unwrap().is_none());
    }

    #[test]
    fn test_probe_missing_table_errors() {
        let s = store();
        assert!(s.probe("no_such_table").is_err());
        assert_eq!(s.probe("wolf_permission").unwrap(), 0);
    }

    #[test]
    fn test_probe_rejects_bad_identifier() {
        let s = store();
        assert!(matches!(
            s.probe("x; DROP TABLE wolf_role"),
            Err(StoreError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_insert_and_find_round_trip() {
        let s = store();
        assert!(s.insert_permission("edit").unwrap());
        let p = s.find_permission("edit").unwrap().unwrap();
        assert_eq!(p.name, "edit");
        assert!(s.find_permission("delete").unwrap().is_none());
    }

    #[test]
    fn test_rename_persists() {
        let s = store();
        s.insert_role("staff").unwrap();
        let r = s.find_role("staff").unwrap().unwrap();
        s.rename_role(r.id, "crew").unwrap();
        assert!(s.find_role("staff").unwrap().is_none());
        assert_eq!(s.find_role("crew").unwrap().unwrap().id, r.id);
    }

    #[test]
    fn test_link_filters() {
        let s = store();
        s.insert_role("editor").unwrap();
        s.insert_permission("edit").unwrap();
        s.insert_permission("delete").unwrap();
        let r = s.find_role("editor").unwrap().unwrap();
        let p1 = s.find_permission("edit").unwrap().unwrap();
        let p2 = s.find_permission("delete").unwrap().unwrap();

        assert!(
            s.insert_grant(RolePermission {
                role_id: r.id,
                permission_id: p1.id,
            })
            .unwrap()
        );
        assert!(
            s.insert_grant(RolePermission {
                role_id: r.id,
                permission_id: p2.id,
            })
            .unwrap()
        );
        assert_eq!(
            s.count_links(LinkTable::RolePermission, LinkFilter::Role(r.id))
                .unwrap(),
            2
        );

        s.delete_links(
            LinkTable::RolePermission,
            LinkFilter::Grant {
                role_id: r.id,
                permission_id: p1.id,
            },
        )
        .unwrap();
        assert_eq!(
            s.count_links(LinkTable::RolePermission, LinkFilter::Role(r.id))
                .unwrap(),
            1
        );
        assert_eq!(
            s.count_links(LinkTable::RolePermission, LinkFilter::Permission(p2.id))
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_role_has_permission() {
        let s = store();
        s.insert_role("editor").unwrap();
        s.insert_permission("edit").unwrap();
        let r = s.find_role("editor").unwrap().unwrap();
        let p = s.find_permission("edit").unwrap().unwrap();

        assert!(!s.role_has_permission(&r, "edit").unwrap());
        s.insert_grant(RolePermission {
            role_id: r.id,
            permission_id: p.id,
        })
        .unwrap();
        assert!(s.role_has_permission(&r, "edit").unwrap());
        assert!(!s.role_has_permission(&r, "delete").unwrap());
    }

    #[test]
    fn test_driver_name() {
        assert_eq!(store().driver_name(), "sqlite");
    }
}
