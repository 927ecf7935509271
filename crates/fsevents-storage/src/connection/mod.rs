//! Connection helpers shared by the evidence store and the catalog.

pub mod pragmas;

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

/// Open an existing SQLite file read-only. Fails if the file is missing;
/// a file that is not a database fails on first use instead.
pub fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

/// Open a read-only connection and force SQLite to read the header, so a
/// non-database file is rejected here rather than at the first query.
pub fn open_verified(path: &Path) -> rusqlite::Result<Connection> {
    let conn = open_read_only(path)?;
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(conn)
}

/// Close a connection, logging instead of failing.
pub fn close_logged(conn: Connection, what: &str) {
    if let Err((_, e)) = conn.close() {
        tracing::warn!(database = what, error = %e, "failed to close database connection");
    }
}
