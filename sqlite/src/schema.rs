//! SQL generation for the authorization tables, with customizable prefixes.
//!
//! Generates `CREATE TABLE` and `DROP TABLE` statements for the
//! role-permission graph. All table names carry a configurable prefix so
//! multiple isolated installations can share one SQLite database.
//!
//! # Table structure
//!
//! - `{prefix}permission` — named capabilities
//! - `{prefix}role` — named permission groups
//! - `{prefix}role_permission` — grant links
//! - `{prefix}user_role` — membership links (user rows are owned elsewhere;
//!   the table exists here so role removal can cascade through it)
//!
//! The `name` columns deliberately carry no `UNIQUE` constraint: name
//! uniqueness is enforced by lookup-before-insert in the provisioning
//! layer, and rename does not pre-check its target name.

use plugin_installer_core::{StoreError, validate_identifier};

/// Validates a table prefix.
///
/// Same charset rule as any bare identifier, but an empty prefix is
/// allowed — a dedicated database needs no namespacing.
pub(crate) fn validate_prefix(prefix: &str) -> Result<(), StoreError> {
    if prefix.is_empty() {
        return Ok(());
    }
    validate_identifier(prefix)
}

/// Generates the `CREATE TABLE` / `CREATE INDEX` batch for all
/// authorization tables with the given prefix.
///
/// Uses `IF NOT EXISTS` throughout, so the batch is safe to re-run.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIdentifier`] if the prefix contains
/// characters other than alphanumerics and underscores.
pub fn generate_schema_sql(prefix: &str) -> Result<String, StoreError> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
CREATE TABLE IF NOT EXISTS {prefix}permission (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS {prefix}role (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS {prefix}role_permission (
    role_id INTEGER NOT NULL,
    permission_id INTEGER NOT NULL,
    FOREIGN KEY (role_id) REFERENCES {prefix}role(id),
    FOREIGN KEY (permission_id) REFERENCES {prefix}permission(id)
);

CREATE TABLE IF NOT EXISTS {prefix}user_role (
    user_id INTEGER NOT NULL,
    role_id INTEGER NOT NULL,
    FOREIGN KEY (role_id) REFERENCES {prefix}role(id)
);

CREATE INDEX IF NOT EXISTS idx_{prefix}role_permission_role ON {prefix}role_permission(role_id);
CREATE INDEX IF NOT EXISTS idx_{prefix}role_permission_permission ON {prefix}role_permission(permission_id);
CREATE INDEX IF NOT EXISTS idx_{prefix}user_role_role ON {prefix}user_role(role_id);
"#
    );

    Ok(sql)
}

/// Generates SQL to drop all authorization tables, links first.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIdentifier`] if the prefix is invalid.
pub fn generate_drop_sql(prefix: &str) -> Result<String, StoreError> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
DROP TABLE IF EXISTS {prefix}user_role;
DROP TABLE IF EXISTS {prefix}role_permission;
DROP TABLE IF EXISTS {prefix}role;
DROP TABLE IF EXISTS {prefix}permission;
"#
    );

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prefixes() {
        assert!(validate_prefix("").is_ok());
        assert!(validate_prefix("wolf_").is_ok());
        assert!(validate_prefix("site2").is_ok());
    }

    #[test]
    fn test_invalid_prefix_special_chars() {
        assert!(validate_prefix("drop;--").is_err());
        assert!(validate_prefix("my prefix").is_err());
        assert!(validate_prefix("pre-fix").is_err());
    }

    #[test]
    fn test_generate_schema_sql_contains_tables() {
        let sql = generate_schema_sql("wolf_").unwrap();
        assert!(sql.contains("wolf_permission"));
        assert!(sql.contains("wolf_role"));
        assert!(sql.contains("wolf_role_permission"));
        assert!(sql.contains("wolf_user_role"));
        assert!(sql.contains("idx_wolf_role_permission_role"));
    }

    #[test]
    fn test_name_columns_not_unique() {
        // Uniqueness is lookup-before-insert, not a constraint.
        let sql = generate_schema_sql("wolf_").unwrap();
        assert!(!sql.contains("UNIQUE"));
    }

    #[test]
    fn test_generate_drop_sql_links_first() {
        let sql = generate_drop_sql("wolf_").unwrap();
        let role_pos = sql.find("DROP TABLE IF EXISTS wolf_role;").unwrap();
        let link_pos = sql.find("DROP TABLE IF EXISTS wolf_role_permission;").unwrap();
        assert!(link_pos < role_pos);
    }

    #[test]
    fn test_schema_sql_is_idempotent() {
        let sql = generate_schema_sql("t_").unwrap();
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(&sql).unwrap();
        conn.execute_batch(&sql).unwrap();
    }
}
