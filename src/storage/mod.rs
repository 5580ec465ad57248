//! Persistence plumbing shared by the contact and message stores.
//!
//! # Contents
//!
//! - [`StoreError`]: the storage-level failure raised by every store adapter
//! - [`ChangeNotifier`] and [`LiveQuery`]: push-based snapshot streams
//! - [`InMemoryDatabase`]: both tables in memory, for tests and previews
//! - [`SqliteDatabase`]: both tables in one `SQLite` file via Diesel
//!
//! The contact and message stores share one database object, so a contact
//! delete cascades to its messages and the message table's change signal
//! fires in the same write.

mod error;
mod live;
mod memory;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use live::{ChangeNotifier, LiveQuery, live_query};
pub use memory::InMemoryDatabase;
pub use sqlite::SqliteDatabase;
