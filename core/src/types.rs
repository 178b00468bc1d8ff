//! Entity definitions for the role-permission authorization graph.
//!
//! These are plain data rows as the storage backend returns them. Name
//! uniqueness for [`Permission`] and [`Role`] is a convention enforced by
//! lookup-before-insert in the provisioning layer, deliberately not a
//! database constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named capability grantable to a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Row id assigned by the storage backend.
    pub id: i64,
    /// Human-readable capability name, e.g. `"gallery_edit"`.
    pub name: String,
}

/// A named group of permissions, assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Row id assigned by the storage backend.
    pub id: i64,
    /// Human-readable role name, e.g. `"editor"`.
    pub name: String,
}

/// A grant link between a role and a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    pub role_id: i64,
    pub permission_id: i64,
}

/// A membership link between a user and a role.
///
/// User provisioning is owned elsewhere; this row only matters here because
/// role removal must cascade through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: i64,
    pub role_id: i64,
}

/// What kind of thing an operation was acting on when it failed.
///
/// Used in error messages so a failure reads as a complete sentence
/// ("permission 'edit' does not exist").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Table,
    Permission,
    Role,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Table => write!(f, "table"),
            EntityKind::Permission => write!(f, "permission"),
            EntityKind::Role => write!(f, "role"),
        }
    }
}

/// The two association tables touched by cascade deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTable {
    /// User ↔ Role membership links.
    UserRole,
    /// Role ↔ Permission grant links.
    RolePermission,
}

impl fmt::Display for LinkTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTable::UserRole => write!(f, "user-role"),
            LinkTable::RolePermission => write!(f, "role-permission"),
        }
    }
}

/// Row selector for link-table deletes and counts.
///
/// The typed equivalent of the ad-hoc `WHERE` fragments the provisioning
/// layer needs: all links owned by one side, or one specific grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFilter {
    /// All links whose `role_id` matches.
    Role(i64),
    /// All links whose `permission_id` matches.
    Permission(i64),
    /// The single grant row for a (role, permission) pair. Only meaningful
    /// against [`LinkTable::RolePermission`].
    Grant { role_id: i64, permission_id: i64 },
}
