//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas shared by every session.
//! - Create the schema once at startup (`open_db`), or verify it per request
//!   (`connect_db`).
//!
//! # Invariants
//! - Returned connections have a 5 second busy timeout.
//! - Returned connections see the latest schema version.

use super::migrations::{apply_migrations, current_user_version, latest_version};
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and creates or upgrades its schema.
///
/// Intended for process startup. File databases are switched to WAL so
/// concurrent request sessions can read while one writes.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let path = path.as_ref();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    let mut conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let bootstrap = enable_wal(&conn).and_then(|()| bootstrap_connection(&mut conn));
    match bootstrap {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={} schema_version={}",
                started_at.elapsed().as_millis(),
                latest_version()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite database with the schema applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start mode=memory");

    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;

    debug!(
        "event=db_open module=db status=ok mode=memory duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

/// Opens one request session against a database prepared by `open_db`.
///
/// # Errors
/// - `DbError::SchemaNotReady` when the file was never bootstrapped or was
///   written by another schema version.
pub fn connect_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let conn = Connection::open(path.as_ref())?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let db_version = current_user_version(&conn)?;
    let expected = latest_version();
    if db_version != expected {
        error!(
            "event=db_connect module=db status=error error_code=schema_not_ready db_version={} expected={}",
            db_version, expected
        );
        return Err(DbError::SchemaNotReady {
            db_version,
            expected,
        });
    }

    debug!("event=db_connect module=db status=ok");
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

fn enable_wal(conn: &Connection) -> DbResult<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    debug!("event=db_journal_mode module=db status=ok mode={mode}");
    Ok(())
}
