//! Schema bootstrap for the `SQLite` database file.
//!
//! The applied schema version is tracked in `PRAGMA user_version`. Each entry
//! in [`MIGRATIONS`] runs once, in order, inside an immediate transaction.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::storage::{StoreError, StoreResult};

const V1_CREATE_TABLES: &str = "
CREATE TABLE contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (name <> ''),
    phone TEXT NOT NULL,
    email TEXT,
    address TEXT,
    notes TEXT,
    avatar_path TEXT
);
CREATE INDEX idx_contacts_phone ON contacts (phone, id);
CREATE INDEX idx_contacts_name ON contacts (name, id);

CREATE TABLE messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id INTEGER NOT NULL REFERENCES contacts (id) ON DELETE CASCADE,
    body TEXT NOT NULL CHECK (body <> ''),
    timestamp_ms INTEGER NOT NULL,
    direction TEXT NOT NULL CHECK (direction IN ('inbound', 'outbound'))
);
CREATE INDEX idx_messages_conversation ON messages (contact_id, timestamp_ms, id);
";

/// Ordered schema migrations; index `n` upgrades version `n` to `n + 1`.
const MIGRATIONS: &[&str] = &[V1_CREATE_TABLES];

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

/// Returns the schema version recorded in the database file.
///
/// # Errors
///
/// Returns a `StoreError` if the pragma cannot be read.
pub fn schema_version(conn: &mut SqliteConnection) -> StoreResult<i32> {
    let row = diesel::sql_query("PRAGMA user_version").get_result::<UserVersion>(conn)?;
    Ok(row.user_version)
}

/// Returns the schema version this build expects.
#[must_use]
pub fn latest_version() -> i32 {
    i32::try_from(MIGRATIONS.len()).unwrap_or(i32::MAX)
}

/// Applies every pending migration.
///
/// # Errors
///
/// Returns a `StoreError` if a migration fails or the file was written by a
/// newer schema version.
pub fn run_pending(conn: &mut SqliteConnection) -> StoreResult<()> {
    let current = schema_version(conn)?;
    if current > latest_version() {
        return Err(StoreError::serialization(format!(
            "database schema version {current} is newer than supported version {}",
            latest_version()
        )));
    }

    for (index, script) in MIGRATIONS.iter().enumerate() {
        let target = i32::try_from(index)
            .map_err(|e| StoreError::serialization(e.to_string()))?
            .saturating_add(1);
        if target <= current {
            continue;
        }
        conn.immediate_transaction::<_, StoreError, _>(|tx| {
            tx.batch_execute(script)?;
            tx.batch_execute(&format!("PRAGMA user_version = {target};"))?;
            Ok(())
        })?;
        tracing::info!(version = target, "applied database migration");
    }
    Ok(())
}
