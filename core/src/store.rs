//! Storage traits implemented by concrete backends.
//!
//! The provisioning layer never talks to a driver directly; it is generic
//! over these two traits so each installer run owns an explicit store
//! instance and tests can substitute misbehaving backends.
//!
//! The contract is deliberately distrustful: mutating calls are advisory,
//! and structural outcomes are confirmed by probe and count reads issued
//! afterwards. A backend that silently no-ops a DDL statement is detected,
//! not believed.

use crate::error::StoreError;
use crate::types::{LinkFilter, LinkTable, Permission, Role, RolePermission};

/// Raw schema-level surface of a storage connection.
pub trait SchemaConn {
    /// Issues a `COUNT(*)` probe against `table`.
    ///
    /// An `Err` means the table did not answer — a missing table and a
    /// broken connection are indistinguishable here by design; the probe is
    /// the existence test, not a catalog lookup.
    fn probe(&self, table: &str) -> Result<u64, StoreError>;

    /// Executes a raw SQL statement.
    ///
    /// The result is advisory only. Callers performing structural changes
    /// ignore it and re-probe instead.
    fn execute(&self, statement: &str) -> Result<(), StoreError>;

    /// Lowercase name of the underlying SQL driver (e.g. `"sqlite"`).
    ///
    /// Install scripts branch on this when a table definition differs
    /// between dialects.
    fn driver_name(&self) -> &'static str;
}

/// Registry of permissions, roles, and their association links.
pub trait AuthStore {
    /// Resolves a permission by exact name.
    fn find_permission(&self, name: &str) -> Result<Option<Permission>, StoreError>;

    /// Resolves a role by exact name.
    fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError>;

    /// Inserts a new permission row.
    ///
    /// Returns `Ok(false)` when the driver rejects the row; `Err` is
    /// reserved for connection-level failures. No duplicate check happens
    /// here — callers look the name up first.
    fn insert_permission(&self, name: &str) -> Result<bool, StoreError>;

    /// Inserts a new role row. Same contract as
    /// [`insert_permission`](Self::insert_permission).
    fn insert_role(&self, name: &str) -> Result<bool, StoreError>;

    /// Persists a new name for an existing permission row.
    fn rename_permission(&self, id: i64, name: &str) -> Result<(), StoreError>;

    /// Persists a new name for an existing role row.
    fn rename_role(&self, id: i64, name: &str) -> Result<(), StoreError>;

    /// Deletes a permission row by id. Verified by
    /// [`count_permissions`](Self::count_permissions) afterwards.
    fn delete_permission(&self, id: i64) -> Result<(), StoreError>;

    /// Deletes a role row by id. Verified by
    /// [`count_roles`](Self::count_roles) afterwards.
    fn delete_role(&self, id: i64) -> Result<(), StoreError>;

    /// Counts permission rows with the given id.
    fn count_permissions(&self, id: i64) -> Result<u64, StoreError>;

    /// Counts role rows with the given id.
    fn count_roles(&self, id: i64) -> Result<u64, StoreError>;

    /// Inserts a role-permission grant link. Boolean contract as for
    /// [`insert_permission`](Self::insert_permission).
    fn insert_grant(&self, grant: RolePermission) -> Result<bool, StoreError>;

    /// Deletes link rows matching `filter` from `table`.
    fn delete_links(&self, table: LinkTable, filter: LinkFilter) -> Result<(), StoreError>;

    /// Counts link rows matching `filter` in `table`.
    fn count_links(&self, table: LinkTable, filter: LinkFilter) -> Result<u64, StoreError>;

    /// Capability query: whether `role` currently holds a permission with
    /// the given name.
    fn role_has_permission(&self, role: &Role, permission: &str) -> Result<bool, StoreError>;
}
