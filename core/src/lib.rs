//! Core types and storage traits for plugin provisioning.
//!
//! This crate defines the shared vocabulary of the plugin-installer
//! workspace: the role-permission entity model, the provisioning error
//! taxonomy, name-list parsing, and the traits concrete storage backends
//! implement ([`SchemaConn`], [`AuthStore`]).
//!
//! The provisioning service itself lives in the `plugin-installer` crate;
//! the SQLite backend lives in `plugin-installer-sqlite`.
//!
//! # Design
//!
//! Operations in this workspace never trust a mutating statement's own
//! success signal. Tables are probed with `COUNT(*)` reads, deletes are
//! verified with count queries, and renames are verified by re-resolving
//! the new name. The traits here encode that contract.

mod error;
mod names;
mod notify;
mod store;
mod types;

pub use error::{InstallError, Result, StoreError};
pub use names::{split_names, validate_identifier};
pub use notify::{Flash, NoticeKind, Notifier};
pub use store::{AuthStore, SchemaConn};
pub use types::{EntityKind, LinkFilter, LinkTable, Permission, Role, RolePermission, UserRole};
