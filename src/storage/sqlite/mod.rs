//! `SQLite` persistence shared by the contact and message stores.
//!
//! A single database file in the application's private storage holds both
//! tables. [`SqliteDatabase`] owns the connection pool and the per-table
//! change notifiers; the stores are built from clones of it.

mod blocking_helpers;
pub mod migrations;
pub mod models;
pub mod schema;

use std::time::Duration;

use camino::Utf8Path;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};

use crate::config::HangoutsConfig;
use crate::storage::{ChangeNotifier, StoreError, StoreResult};

pub use blocking_helpers::SqlitePool;
pub(crate) use blocking_helpers::{get_conn, run_blocking};
use blocking_helpers::ConnectionPragmas;

const MEMORY_URL: &str = ":memory:";

/// Handle to the shared `SQLite` database.
///
/// Cheap to clone; clones share the pool and change notifiers.
///
/// # Example
///
/// ```no_run
/// use hangouts::config::HangoutsConfig;
/// use hangouts::contact::adapters::sqlite::SqliteContactStore;
/// use hangouts::storage::SqliteDatabase;
///
/// let database = SqliteDatabase::open(&HangoutsConfig::default())?;
/// let contacts = SqliteContactStore::new(database);
/// # Ok::<(), hangouts::storage::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
    contact_changes: ChangeNotifier,
    message_changes: ChangeNotifier,
}

impl SqliteDatabase {
    /// Opens (creating if needed) the database file named by `config` and
    /// applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the data directory cannot be created, the
    /// pool cannot connect, or a migration fails.
    pub fn open(config: &HangoutsConfig) -> StoreResult<Self> {
        let path = config.database_path();
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(StoreError::database)?;
        }
        Self::open_file(
            &path,
            config.pool_size,
            Duration::from_millis(config.busy_timeout_ms),
        )
    }

    /// Opens the database file at `path` with the given pool size.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the pool cannot connect or a migration fails.
    pub fn open_file(path: &Utf8Path, pool_size: u32, busy_timeout: Duration) -> StoreResult<Self> {
        let pragmas = ConnectionPragmas {
            busy_timeout,
            write_ahead_log: true,
        };
        let database = Self::build(path.as_str(), pool_size.max(1), pragmas)?;
        tracing::debug!(path = %path, pool_size, "opened sqlite database");
        Ok(database)
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection because every `SQLite` in-memory
    /// connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the connection or migration fails.
    pub fn open_in_memory() -> StoreResult<Self> {
        let pragmas = ConnectionPragmas {
            busy_timeout: Duration::from_secs(5),
            write_ahead_log: false,
        };
        Self::build(MEMORY_URL, 1, pragmas)
    }

    fn build(url: &str, pool_size: u32, pragmas: ConnectionPragmas) -> StoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .max_lifetime(None)
            .idle_timeout(None)
            .connection_customizer(Box::new(pragmas))
            .build(manager)
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let mut conn = get_conn(&pool)?;
        migrations::run_pending(&mut conn)?;

        Ok(Self {
            pool,
            contact_changes: ChangeNotifier::new(),
            message_changes: ChangeNotifier::new(),
        })
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) const fn contact_changes(&self) -> &ChangeNotifier {
        &self.contact_changes
    }

    pub(crate) const fn message_changes(&self) -> &ChangeNotifier {
        &self.message_changes
    }
}
