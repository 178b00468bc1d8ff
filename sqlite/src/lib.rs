//! SQLite storage backend for the plugin provisioning workspace.
//!
//! Implements the `plugin-installer-core` storage traits over
//! [`rusqlite`], with prefix-namespaced authorization tables so several
//! isolated installations can share one database file.
//!
//! # Quick start
//!
//! ```
//! use plugin_installer_sqlite::SqliteStore;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! let store = SqliteStore::new(conn, "wolf_").unwrap();
//! store.setup().unwrap();
//! ```
//!
//! The store is then handed to `plugin_installer::Installer`, which is
//! generic over the core traits and never touches `rusqlite` directly.

mod schema;
mod store;

pub use schema::{generate_drop_sql, generate_schema_sql};
pub use store::SqliteStore;
