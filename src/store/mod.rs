pub mod error;
pub mod ops;
pub mod schema;
pub mod types;

use rusqlite::Connection;
use std::path::Path;

use crate::store::error::StoreError;

/// Open the verax database and bring the schema up to date.
/// Every component goes through this; nobody else runs DDL.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.busy_timeout(std::time::Duration::from_millis(500)).ok();
    schema::apply_migration(&conn)?;
    Ok(conn)
}
