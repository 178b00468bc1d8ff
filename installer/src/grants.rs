//! Grant and revoke of role ↔ permission links.
//!
//! Both operations are guarded on each side: the role must resolve, each
//! permission must resolve, and the link's current state decides whether
//! any work happens at all. Whether a role holds a permission is the
//! store's capability query, not re-derived here.

use plugin_installer_core::{
    AuthStore, InstallError, LinkFilter, LinkTable, Result, RolePermission, split_names,
};
use tracing::debug;

use crate::Installer;

impl<S: AuthStore> Installer<S> {
    /// Grants each permission in a comma-separated list to a role.
    ///
    /// Permissions the role already holds are skipped. Stops at the first
    /// failure; grants made earlier in the list stay in place.
    ///
    /// # Errors
    ///
    /// - [`InstallError::RoleNotFound`] if the role does not resolve
    /// - [`InstallError::PermissionNotFound`] for the first permission name
    ///   that does not resolve
    /// - [`InstallError::GrantFailed`] if the backend rejects a link insert
    ///
    /// # Examples
    ///
    /// ```
    /// # use plugin_installer::Installer;
    /// # use plugin_installer_sqlite::SqliteStore;
    /// # let conn = rusqlite::Connection::open_in_memory().unwrap();
    /// # let store = SqliteStore::new(conn, "wolf_").unwrap();
    /// # store.setup().unwrap();
    /// # let installer = Installer::new(store);
    /// installer.create_roles("editor").unwrap();
    /// installer.create_permissions("edit, delete").unwrap();
    /// installer.assign_permissions("editor", "edit, delete").unwrap();
    /// installer.revoke_permissions("editor", "edit").unwrap();
    /// ```
    pub fn assign_permissions(&self, role: &str, permissions: &str) -> Result<()> {
        let role = role.trim();
        let Some(r) = self.store.find_role(role)? else {
            return Err(InstallError::RoleNotFound(role.to_string()));
        };

        for name in split_names(permissions) {
            if self.store.role_has_permission(&r, name)? {
                continue;
            }
            let Some(p) = self.store.find_permission(name)? else {
                return Err(InstallError::PermissionNotFound(name.to_string()));
            };
            debug!(role, permission = name, "Granting permission");
            let grant = RolePermission {
                role_id: r.id,
                permission_id: p.id,
            };
            if !self.store.insert_grant(grant)? {
                return Err(InstallError::GrantFailed {
                    role: role.to_string(),
                    permission: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Revokes each permission in a comma-separated list from a role.
    ///
    /// Permissions the role does not hold are skipped, so revoking is
    /// idempotent. Each deleted link is verified gone by a zero count.
    ///
    /// # Errors
    ///
    /// - [`InstallError::RoleNotFound`] if the role does not resolve
    /// - [`InstallError::PermissionNotFound`] if a held permission no
    ///   longer resolves by name (inconsistent data)
    /// - [`InstallError::RevokeVerificationFailed`] if the link row
    ///   survives its delete
    pub fn revoke_permissions(&self, role: &str, permissions: &str) -> Result<()> {
        let role = role.trim();
        let Some(r) = self.store.find_role(role)? else {
            return Err(InstallError::RoleNotFound(role.to_string()));
        };

        for name in split_names(permissions) {
            if !self.store.role_has_permission(&r, name)? {
                continue;
            }
            let Some(p) = self.store.find_permission(name)? else {
                return Err(InstallError::PermissionNotFound(name.to_string()));
            };
            debug!(role, permission = name, "Revoking permission");

            let link = LinkFilter::Grant {
                role_id: r.id,
                permission_id: p.id,
            };
            self.store.delete_links(LinkTable::RolePermission, link)?;
            if self.store.count_links(LinkTable::RolePermission, link)? > 0 {
                return Err(InstallError::RevokeVerificationFailed {
                    role: role.to_string(),
                    permission: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
