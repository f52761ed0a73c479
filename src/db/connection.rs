use std::fs;
use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Open (creating if needed) the SQLite file at `path` and make sure the
/// schema exists. Missing parent directories are created first.
pub fn open_database(path: &Path) -> anyhow::Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
    ensure_schema(&conn).context("failed to create attendance table")?;

    info!(path = %path.display(), "attendance database ready");
    Ok(conn)
}

/// Create the `attendance` table when it is missing. Safe to run against an
/// existing database.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY,
            lrn TEXT,
            timestamp TEXT
        )",
        [],
    )?;
    debug!("attendance schema ensured");
    Ok(())
}

/// Release the connection at shutdown.
pub fn close_database(conn: Connection) -> StoreResult<()> {
    conn.close().map_err(|(_conn, err)| {
        warn!(error = %err, "failed to close attendance database");
        StoreError::from(err)
    })?;
    info!("attendance database closed");
    Ok(())
}
