//! Error types for provisioning operations.
//!
//! Every failure carries a complete human-readable sentence via `Display`,
//! because the install abort protocol forwards these messages verbatim to
//! the user-facing notification channel.

use thiserror::Error;

use crate::types::{EntityKind, LinkTable};

/// Errors that can occur during provisioning operations.
///
/// Structural mutations are verified with independent probe reads, so most
/// variants here report a *verification* failure rather than a driver
/// error; connection-level failures pass through as [`Store`](Self::Store).
#[derive(Debug, Error)]
pub enum InstallError {
    /// A table creation found the table already present.
    #[error("table '{0}' already exists")]
    AlreadyExists(String),

    /// A table or entity required by the operation did not resolve.
    #[error("{0} '{1}' does not exist")]
    NotFound(EntityKind, String),

    /// The creation statement ran but the table still fails its probe.
    #[error("table '{0}' was not created")]
    CreationVerificationFailed(String),

    /// The drop statement ran but the table still answers its probe.
    #[error("table '{0}' was not removed")]
    RemovalVerificationFailed(String),

    /// The new name did not resolve after a rename was persisted.
    #[error("could not rename {kind} '{from}' to '{to}'")]
    RenameVerificationFailed {
        kind: EntityKind,
        from: String,
        to: String,
    },

    /// The backend rejected an entity insert.
    #[error("could not create {0} '{1}'")]
    InsertFailed(EntityKind, String),

    /// Link rows survived a cascade delete step.
    #[error("could not remove {table} link: {name}")]
    LinkRemovalFailed { table: LinkTable, name: String },

    /// The owning row survived its own delete during cascade removal.
    #[error("could not remove {0} '{1}'")]
    EntityRemovalFailed(EntityKind, String),

    /// The role named in a grant or revoke does not exist.
    #[error("role '{0}' does not exist")]
    RoleNotFound(String),

    /// A permission named in a grant or revoke does not exist.
    #[error("permission '{0}' does not exist")]
    PermissionNotFound(String),

    /// The backend rejected a role-permission link insert.
    #[error("could not assign permission '{permission}' to role '{role}'")]
    GrantFailed { role: String, permission: String },

    /// A grant row survived its revoke delete.
    #[error("could not revoke permission '{permission}' from role '{role}'")]
    RevokeVerificationFailed { role: String, permission: String },

    /// Connection-level storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by storage backends.
///
/// Stringly typed on purpose: this crate must not depend on any concrete
/// driver, so backends render their native error before crossing the trait
/// boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver-level failure, rendered by the backend.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A table or column name contained characters that cannot be safely
    /// interpolated into SQL.
    #[error("invalid identifier '{0}': must contain only alphanumeric characters and underscores")]
    InvalidIdentifier(String),
}

/// Convenience alias for results with [`InstallError`].
pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_read_as_sentences() {
        assert_eq!(
            InstallError::AlreadyExists("widgets".into()).to_string(),
            "table 'widgets' already exists"
        );
        assert_eq!(
            InstallError::NotFound(EntityKind::Permission, "edit".into()).to_string(),
            "permission 'edit' does not exist"
        );
        assert_eq!(
            InstallError::LinkRemovalFailed {
                table: LinkTable::RolePermission,
                name: "editor".into(),
            }
            .to_string(),
            "could not remove role-permission link: editor"
        );
        assert_eq!(
            InstallError::GrantFailed {
                role: "editor".into(),
                permission: "edit".into(),
            }
            .to_string(),
            "could not assign permission 'edit' to role 'editor'"
        );
    }

    #[test]
    fn test_store_error_passthrough() {
        let err = InstallError::from(StoreError::Backend("disk I/O error".into()));
        assert_eq!(err.to_string(), "storage backend error: disk I/O error");
    }
}
