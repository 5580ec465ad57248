//! Persistence adapters for the message module.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryMessageStore`]: over the shared in-memory database,
//!   for tests and previews
//! - [`sqlite::SqliteMessageStore`]: `SQLite` persistence using Diesel ORM

pub mod memory;
pub mod sqlite;
