//! Role set reconciliation.
//!
//! Same convergence semantics as permission reconciliation, with a longer
//! cascade on removal: a role's user-membership links go first, then its
//! grant links, then the role row, each delete verified by a zero count
//! before the next step runs.

use plugin_installer_core::{
    AuthStore, EntityKind, InstallError, LinkFilter, LinkTable, Result, Role, split_names,
};
use tracing::debug;

use crate::Installer;

impl<S: AuthStore> Installer<S> {
    /// Creates every role in a comma-separated list that does not already
    /// exist.
    ///
    /// Stops at the first insertion failure; roles created earlier in the
    /// list stay created.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InsertFailed`] naming the first role the
    /// backend rejected.
    pub fn create_roles(&self, roles: &str) -> Result<()> {
        for name in split_names(roles) {
            if self.store.find_role(name)?.is_some() {
                continue;
            }
            debug!(role = name, "Creating role");
            if !self.store.insert_role(name)? {
                return Err(InstallError::InsertFailed(EntityKind::Role, name.to_string()));
            }
        }
        Ok(())
    }

    /// Removes every role in a comma-separated list that exists, cascading
    /// through user-role and role-permission links in that order.
    ///
    /// Absent names are skipped. Stops at the first verification failure,
    /// leaving the role in place.
    ///
    /// # Errors
    ///
    /// - [`InstallError::LinkRemovalFailed`] if membership or grant links
    ///   survive their delete (the variant names which link table)
    /// - [`InstallError::EntityRemovalFailed`] if the role row survives its
    ///   own delete
    pub fn remove_roles(&self, roles: &str) -> Result<()> {
        for name in split_names(roles) {
            if let Some(r) = self.store.find_role(name)? {
                debug!(role = name, "Removing role");
                self.remove_role_entry(&r)?;
            }
        }
        Ok(())
    }

    /// Renames a role and verifies the new name resolves.
    ///
    /// As with permissions, the target name is not checked for uniqueness;
    /// renaming onto an existing name yields duplicate-name roles.
    ///
    /// # Errors
    ///
    /// - [`InstallError::NotFound`] if `role` does not resolve
    /// - [`InstallError::RenameVerificationFailed`] if `new_name` does not
    ///   resolve after the write
    pub fn rename_role(&self, role: &str, new_name: &str) -> Result<()> {
        let role = role.trim();
        let new_name = new_name.trim();

        let Some(r) = self.store.find_role(role)? else {
            return Err(InstallError::NotFound(EntityKind::Role, role.to_string()));
        };

        self.store.rename_role(r.id, new_name)?;

        if self.store.find_role(new_name)?.is_none() {
            return Err(InstallError::RenameVerificationFailed {
                kind: EntityKind::Role,
                from: role.to_string(),
                to: new_name.to_string(),
            });
        }
        Ok(())
    }

    /// Cascade-safe removal of one resolved role. Link order is fixed:
    /// user-role first, role-permission second, owning row last.
    fn remove_role_entry(&self, r: &Role) -> Result<()> {
        for table in [LinkTable::UserRole, LinkTable::RolePermission] {
            self.store.delete_links(table, LinkFilter::Role(r.id))?;
            if self.store.count_links(table, LinkFilter::Role(r.id))? > 0 {
                return Err(InstallError::LinkRemovalFailed {
                    table,
                    name: r.name.clone(),
                });
            }
        }

        self.store.delete_role(r.id)?;
        if self.store.count_roles(r.id)? > 0 {
            return Err(InstallError::EntityRemovalFailed(
                EntityKind::Role,
                r.name.clone(),
            ));
        }
        Ok(())
    }
}
