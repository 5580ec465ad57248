//! Blocking operation helpers for the `SQLite` stores.
//!
//! Diesel calls are synchronous; these helpers move them onto Tokio's
//! blocking thread pool so they never stall async worker threads.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};

use crate::storage::{StoreError, StoreResult};

/// `SQLite` connection pool type.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Pooled connection type for internal use.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Runs a blocking database operation on the blocking thread pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::connection(format!("task join error: {e}")))?
}

/// Obtains a connection from the pool.
pub(crate) fn get_conn(pool: &SqlitePool) -> StoreResult<PooledConn> {
    pool.get().map_err(|e| StoreError::connection(e.to_string()))
}

/// Per-connection pragmas applied whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
pub(super) struct ConnectionPragmas {
    pub(super) busy_timeout: Duration,
    pub(super) write_ahead_log: bool,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        let mut pragmas = format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        if self.write_ahead_log {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        conn.batch_execute(&pragmas).map_err(r2d2::Error::QueryError)
    }
}
