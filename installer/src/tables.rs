//! Verified table DDL.
//!
//! Structural changes are confirmed by an independent `COUNT(*)` probe
//! rather than by the DDL statement's own result — a driver that silently
//! no-ops a `CREATE TABLE` is caught here. Update statements are the one
//! exception: they are not existence-changing, so they get a pre-check and
//! no post-verification.

use plugin_installer_core::{
    EntityKind, InstallError, Result, SchemaConn, validate_identifier,
};
use tracing::debug;

use crate::Installer;

impl<S: SchemaConn> Installer<S> {
    /// Creates a table and verifies it exists afterwards.
    ///
    /// The probe is the existence test on both sides of the statement:
    /// a successful probe up front means the table is already there, and a
    /// failed probe afterwards means the creation did not take, whatever
    /// the statement itself reported.
    ///
    /// # Errors
    ///
    /// - [`InstallError::AlreadyExists`] if `table` answers a probe before
    ///   the statement runs
    /// - [`InstallError::CreationVerificationFailed`] if it still does not
    ///   answer one afterwards
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
    /// installer
    ///     .create_table("widgets", "CREATE TABLE widgets (id INTEGER PRIMARY KEY)")
    ///     .unwrap();
    /// assert!(installer.create_table("widgets", "CREATE TABLE widgets (id INT)").is_err());
    /// ```
    pub fn create_table(&self, table: &str, statement: &str) -> Result<()> {
        validate_identifier(table)?;
        debug!(table, "Creating table");

        if self.store.probe(table).is_ok() {
            return Err(InstallError::AlreadyExists(table.to_string()));
        }

        // The statement's own result is untrusted; the re-probe decides.
        let _ = self.store.execute(statement);

        if self.store.probe(table).is_err() {
            return Err(InstallError::CreationVerificationFailed(table.to_string()));
        }
        Ok(())
    }

    /// Runs an alteration statement against an existing table.
    ///
    /// Fails up front if the table does not answer a probe. There is no
    /// post-verification: updates are not existence-changing.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::NotFound`] if `table` does not exist.
    pub fn update_table(&self, table: &str, statement: &str) -> Result<()> {
        validate_identifier(table)?;
        debug!(table, "Updating table");

        if self.store.probe(table).is_err() {
            return Err(InstallError::NotFound(EntityKind::Table, table.to_string()));
        }

        let _ = self.store.execute(statement);
        Ok(())
    }

    /// Drops a table and verifies it is gone afterwards.
    ///
    /// The drop is unconditional (`DROP TABLE IF EXISTS`), so removing an
    /// absent table succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::RemovalVerificationFailed`] if the table
    /// still answers a probe after the drop.
    pub fn remove_table(&self, table: &str) -> Result<()> {
        validate_identifier(table)?;
        debug!(table, "Removing table");

        let _ = self.store.execute(&format!("DROP TABLE IF EXISTS {table}"));

        if self.store.probe(table).is_ok() {
            return Err(InstallError::RemovalVerificationFailed(table.to_string()));
        }
        Ok(())
    }

    /// Lowercase name of the SQL driver behind the store.
    ///
    /// For install scripts whose table definitions differ by dialect.
    pub fn driver_name(&self) -> &'static str {
        self.store.driver_name()
    }
}
