//! Permission set reconciliation.
//!
//! Create/remove operate on comma-separated name lists and converge on the
//! desired state: names already present (on create) or already absent (on
//! remove) are silently skipped. Removal is cascade-safe — grant links go
//! first, with a zero-count check after every delete.

use plugin_installer_core::{
    AuthStore, EntityKind, InstallError, LinkFilter, LinkTable, Permission, Result, split_names,
};
use tracing::debug;

use crate::Installer;

impl<S: AuthStore> Installer<S> {
    /// Creates every permission in a comma-separated list that does not
    /// already exist.
    ///
    /// Stops at the first insertion failure; permissions created earlier in
    /// the list stay created (no rollback).
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InsertFailed`] naming the first permission
    /// the backend rejected.
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
    /// installer.create_permissions("gallery_view, gallery_edit").unwrap();
    /// // Converges: calling again creates nothing and succeeds.
    /// installer.create_permissions("gallery_view, gallery_edit").unwrap();
    /// ```
    pub fn create_permissions(&self, permissions: &str) -> Result<()> {
        for name in split_names(permissions) {
            if self.store.find_permission(name)?.is_some() {
                continue;
            }
            debug!(permission = name, "Creating permission");
            if !self.store.insert_permission(name)? {
                return Err(InstallError::InsertFailed(
                    EntityKind::Permission,
                    name.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Removes every permission in a comma-separated list that exists,
    /// cascading through its grant links first.
    ///
    /// Absent names are skipped, so removal never fails on a permission
    /// that is already gone. Stops at the first verification failure.
    ///
    /// # Errors
    ///
    /// - [`InstallError::LinkRemovalFailed`] if grant links survive their
    ///   delete
    /// - [`InstallError::EntityRemovalFailed`] if the permission row
    ///   survives its own delete
    pub fn remove_permissions(&self, permissions: &str) -> Result<()> {
        for name in split_names(permissions) {
            if let Some(p) = self.store.find_permission(name)? {
                debug!(permission = name, "Removing permission");
                self.remove_permission_entry(&p)?;
            }
        }
        Ok(())
    }

    /// Renames a permission and verifies the new name resolves.
    ///
    /// The target name is deliberately not checked for uniqueness first;
    /// renaming onto a name that already exists succeeds and leaves two
    /// permissions with that name.
    ///
    /// # Errors
    ///
    /// - [`InstallError::NotFound`] if `permission` does not resolve
    /// - [`InstallError::RenameVerificationFailed`] if `new_name` does not
    ///   resolve after the write
    pub fn rename_permission(&self, permission: &str, new_name: &str) -> Result<()> {
        let permission = permission.trim();
        let new_name = new_name.trim();

        let Some(p) = self.store.find_permission(permission)? else {
            return Err(InstallError::NotFound(
                EntityKind::Permission,
                permission.to_string(),
            ));
        };

        self.store.rename_permission(p.id, new_name)?;

        if self.store.find_permission(new_name)?.is_none() {
            return Err(InstallError::RenameVerificationFailed {
                kind: EntityKind::Permission,
                from: permission.to_string(),
                to: new_name.to_string(),
            });
        }
        Ok(())
    }

    /// Cascade-safe removal of one resolved permission: grant links, link
    /// count check, owning row, row count check. Any nonzero count aborts
    /// with the entity intact from the caller's point of view.
    fn remove_permission_entry(&self, p: &Permission) -> Result<()> {
        self.store
            .delete_links(LinkTable::RolePermission, LinkFilter::Permission(p.id))?;
        if self
            .store
            .count_links(LinkTable::RolePermission, LinkFilter::Permission(p.id))?
            > 0
        {
            return Err(InstallError::LinkRemovalFailed {
                table: LinkTable::RolePermission,
                name: p.name.clone(),
            });
        }

        self.store.delete_permission(p.id)?;
        if self.store.count_permissions(p.id)? > 0 {
            return Err(InstallError::EntityRemovalFailed(
                EntityKind::Permission,
                p.name.clone(),
            ));
        }
        Ok(())
    }
}
