//! Idempotent schema and role-permission provisioning for plugin install
//! flows.
//!
//! This crate is the library surface a plugin lifecycle manager calls from
//! install and uninstall scripts. It provides:
//!
//! - **Verified table DDL** — create/update/remove with existence confirmed
//!   by an independent probe, never by the statement's own success signal
//! - **Permission and role set reconciliation** — create-if-absent and
//!   cascade-safe removal of comma-separated name lists, plus rename with
//!   post-write verification
//! - **Grant/revoke** of role ↔ permission links, idempotent on both sides
//! - **Install abort protocol** — de-registering a half-installed plugin
//!   and signalling the orchestrator to halt or redirect
//!
//! Every operation is fail-fast: the first verification failure returns an
//! error describing exactly what was left standing, and no rollback of
//! earlier steps is attempted. Callers stop their own script sequence on
//! the first `Err`.
//!
//! # Quick start
//!
//! ```
//! use plugin_installer::Installer;
//! use plugin_installer_sqlite::SqliteStore;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! let store = SqliteStore::new(conn, "wolf_").unwrap();
//! store.setup().unwrap();
//!
//! let installer = Installer::new(store);
//! installer
//!     .create_table("gallery", "CREATE TABLE gallery (id INTEGER PRIMARY KEY, title TEXT)")
//!     .unwrap();
//! installer.create_permissions("gallery_view, gallery_edit").unwrap();
//! installer.create_roles("gallery_admin").unwrap();
//! installer
//!     .assign_permissions("gallery_admin", "gallery_view, gallery_edit")
//!     .unwrap();
//! ```
//!
//! # Aborting a failed install
//!
//! ```no_run
//! use plugin_installer::{Abort, fail_install, PluginRegistry};
//! use plugin_installer_core::Flash;
//!
//! # fn install() -> plugin_installer_core::Result<()> { Ok(()) }
//! let mut registry = PluginRegistry::open("plugins.json").unwrap();
//! let mut flash = Flash::new();
//!
//! if let Err(e) = install() {
//!     match fail_install(&mut registry, &mut flash, "gallery", e.to_string()) {
//!         Abort::Halt { .. } => return,
//!         Abort::Redirect { .. } => unreachable!(),
//!     }
//! }
//! ```

mod abort;
mod grants;
mod permissions;
mod registry;
mod roles;
mod tables;

pub use abort::{Abort, SETTINGS_ROUTE, fail_install, fail_uninstall};
pub use plugin_installer_core::{
    AuthStore, EntityKind, Flash, InstallError, LinkTable, NoticeKind, Notifier, Result,
    SchemaConn, StoreError,
};
pub use registry::{PluginInfo, PluginRegistry, RegistryError};

/// Provisioning service for one plugin install or uninstall run.
///
/// Owns its storage backend; construct one per run. The DDL operations
/// require a [`SchemaConn`] backend, the permission/role/grant operations
/// an [`AuthStore`] backend — the SQLite store implements both.
pub struct Installer<S> {
    store: S,
}

impl<S> Installer<S> {
    /// Creates an installer over an explicit storage backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the installer and returns the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}
